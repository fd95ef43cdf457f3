use hello_mcp::greeting::{HelloWorldBean, HelloWorldRemote, say_hello};
use proptest::prelude::*;

proptest! {
    #[test]
    fn greeting_is_prefix_name_suffix(name in any::<String>()) {
        prop_assert_eq!(say_hello(&name), format!("Hello, {}!", name));
    }

    #[test]
    fn greeting_is_idempotent(name in ".*") {
        prop_assert_eq!(say_hello(&name), say_hello(&name));
    }

    #[test]
    fn bean_matches_free_function(name in "\\PC{0,64}") {
        prop_assert_eq!(HelloWorldBean.say_hello(&name), say_hello(&name));
    }

    #[test]
    fn name_is_recoverable_from_greeting(name in any::<String>()) {
        let greeting = say_hello(&name);
        let inner = greeting
            .strip_prefix("Hello, ")
            .and_then(|rest| rest.strip_suffix('!'));
        prop_assert_eq!(inner, Some(name.as_str()));
    }
}

#[test]
fn documented_examples() {
    assert_eq!(say_hello(""), "Hello, !");
    assert_eq!(say_hello("World"), "Hello, World!");
}
