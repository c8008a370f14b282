//! Contains types used throughout the MQTT specification.

mod binary;
mod int;
mod qos;
mod string;
mod topic;
mod will;

pub use binary::MqttBinary;
pub use int::VarByteInt;
pub use qos::{IdentifiedQoS, QoS};
pub use string::MqttString;
pub use topic::SubscribeTopic;
pub use will::Will;
