use crate::greeting::HelloWorldRemote;
use crate::model::{SayHelloResponse, SystemInfo};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SayHelloParams {
    /// Name to greet. Any text is accepted, including the empty string.
    #[serde(default)]
    pub name: String,
}

pub fn say_hello(greeter: &dyn HelloWorldRemote, params: SayHelloParams) -> SayHelloResponse {
    SayHelloResponse {
        greeting: greeter.say_hello(&params.name),
    }
}

pub fn system_info() -> SystemInfo {
    SystemInfo::collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greeting::HelloWorldBean;

    #[test]
    fn missing_name_deserializes_as_empty() {
        let params: SayHelloParams = serde_json::from_str("{}").expect("params");
        let response = say_hello(&HelloWorldBean, params);
        assert_eq!(response.greeting, "Hello, !");
    }

    #[test]
    fn name_is_passed_verbatim() {
        let params: SayHelloParams =
            serde_json::from_value(serde_json::json!({ "name": "World" })).expect("params");
        assert_eq!(say_hello(&HelloWorldBean, params).greeting, "Hello, World!");
    }
}
