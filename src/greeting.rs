//! The greeting contract and its stateless remote-callable implementor.

const GREETING_PREFIX: &str = "Hello, ";
const GREETING_SUFFIX: &str = "!";

/// Builds `"Hello, " + name + "!"`.
///
/// Total over all inputs: empty names and arbitrary Unicode are accepted
/// as-is, nothing is trimmed or validated.
pub fn say_hello(name: &str) -> String {
    let mut greeting =
        String::with_capacity(GREETING_PREFIX.len() + name.len() + GREETING_SUFFIX.len());
    greeting.push_str(GREETING_PREFIX);
    greeting.push_str(name);
    greeting.push_str(GREETING_SUFFIX);
    greeting
}

/// Contract implemented by components that can be invoked remotely.
pub trait HelloWorldRemote: Send + Sync {
    fn say_hello(&self, name: &str) -> String;
}

/// Stateless greeter. Holds no data, so every instance is interchangeable.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HelloWorldBean;

impl HelloWorldBean {
    pub fn new() -> Self {
        Self
    }
}

impl HelloWorldRemote for HelloWorldBean {
    fn say_hello(&self, name: &str) -> String {
        say_hello(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greets_world() {
        assert_eq!(say_hello("World"), "Hello, World!");
    }

    #[test]
    fn empty_name_is_accepted() {
        assert_eq!(say_hello(""), "Hello, !");
    }

    #[test]
    fn unicode_and_whitespace_pass_through_untouched() {
        assert_eq!(say_hello("  Zoë 🌍 "), "Hello,   Zoë 🌍 !");
        assert_eq!(say_hello("世界"), "Hello, 世界!");
    }

    #[test]
    fn repeated_calls_are_identical() {
        let first = say_hello("Ada");
        let second = say_hello("Ada");
        assert_eq!(first, second);
    }

    #[test]
    fn bean_delegates_to_free_function() {
        let bean = HelloWorldBean::new();
        assert_eq!(bean.say_hello("Bean"), say_hello("Bean"));
    }

    #[test]
    fn bean_is_usable_as_trait_object() {
        let remote: Box<dyn HelloWorldRemote> = Box::new(HelloWorldBean);
        assert_eq!(remote.say_hello("dyn"), "Hello, dyn!");
    }
}
