#![forbid(unsafe_code)]

mod definitions;
mod dispatch;
mod exchange;
mod families;
mod guide;
mod persons;

pub(crate) use definitions::handler_definitions;
pub(crate) use dispatch::dispatch_handler;

use serde_json::Value;

pub(crate) type Args = serde_json::Map<String, Value>;
pub(crate) type ToolResult = Result<Value, Value>;
