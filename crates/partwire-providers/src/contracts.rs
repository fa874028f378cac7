//! Service contracts
//!
//! Each hosted contract has a trait, a [`ContractDescription`] for the host
//! and a dispatch function mapping operation names onto trait methods.

use partwire_domain::error::{Error, Result};
use partwire_domain::ports::decode_arguments;
use partwire_domain::{ContractDescription, Disposable};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::constants::{
    GET_DATA_OPERATION, GREET_OPERATION, GREETING_CONTRACT, SERVICE_CONTRACT, VARIANT_OPERATION,
};

/// Demo data service
pub trait Service: Send + Sync {
    fn get_data(&self, value: i32) -> String;
}

/// Dependency carrying an identity
pub trait SomeType: Send + Sync {
    fn id(&self) -> Uuid;
}

/// Role selected by configuration: mock or production greeting
pub trait Greeter: Send + Sync {
    fn greet(&self, name: &str) -> String;

    /// Tag of the variant, as used in configuration
    fn variant(&self) -> &'static str;

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        None
    }
}

/// Hosted greeting service
pub trait Greeting: Send + Sync {
    fn greet(&self, name: &str) -> String;

    fn variant(&self) -> &'static str;
}

pub fn service_contract() -> ContractDescription {
    ContractDescription::new(SERVICE_CONTRACT).with_operation(GET_DATA_OPERATION)
}

pub fn greeting_contract() -> ContractDescription {
    ContractDescription::new(GREETING_CONTRACT)
        .with_operation(GREET_OPERATION)
        .with_operation(VARIANT_OPERATION)
}

#[derive(Debug, Deserialize)]
struct GetDataArgs {
    value: i32,
}

#[derive(Debug, Deserialize)]
struct GreetArgs {
    name: String,
}

pub fn dispatch_service(service: &dyn Service, operation: &str, args: Value) -> Result<Value> {
    match operation {
        GET_DATA_OPERATION => {
            let args: GetDataArgs = decode_arguments(operation, args)?;
            Ok(Value::String(service.get_data(args.value)))
        }
        _ => Err(Error::unknown_operation(SERVICE_CONTRACT, operation)),
    }
}

pub fn dispatch_greeting(greeting: &dyn Greeting, operation: &str, args: Value) -> Result<Value> {
    match operation {
        GREET_OPERATION => {
            let args: GreetArgs = decode_arguments(operation, args)?;
            Ok(Value::String(greeting.greet(&args.name)))
        }
        VARIANT_OPERATION => Ok(Value::String(greeting.variant().to_string())),
        _ => Err(Error::unknown_operation(GREETING_CONTRACT, operation)),
    }
}
