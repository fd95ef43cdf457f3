use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use crate::demo::SystemInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SayHelloResponse {
    pub greeting: String,
}
