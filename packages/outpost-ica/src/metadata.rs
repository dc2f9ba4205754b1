//! The ICS-27 channel version metadata.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{from_json, to_json_string};

use crate::{
    keys::{ENCODING_PROTO3, ICA_VERSION, TX_TYPE_SDK_MULTI_MSG},
    CodecError,
};

/// The metadata negotiated as the version string of an ICS-27 channel.
///
/// The controller sends it with an empty `address`; the host fills in the address of
/// the interchain account and returns it as the counterparty version on `OpenAck`.
#[cw_serde]
pub struct IcaMetadata {
    /// The ICS-27 protocol version
    pub version: String,
    /// The connection identifier on the controller chain
    pub controller_connection_id: String,
    /// The connection identifier on the host chain
    pub host_connection_id: String,
    /// The interchain account address, empty until the host registers it
    #[serde(default)]
    pub address: String,
    /// The tx encoding
    pub encoding: String,
    /// The tx type
    pub tx_type: String,
}

impl IcaMetadata {
    /// Creates the metadata the controller proposes in `MsgChannelOpenInit`.
    pub fn new(
        controller_connection_id: impl Into<String>,
        host_connection_id: impl Into<String>,
    ) -> Self {
        Self {
            version: ICA_VERSION.to_string(),
            controller_connection_id: controller_connection_id.into(),
            host_connection_id: host_connection_id.into(),
            address: String::new(),
            encoding: ENCODING_PROTO3.to_string(),
            tx_type: TX_TYPE_SDK_MULTI_MSG.to_string(),
        }
    }

    /// Parses a channel version string.
    /// # Errors
    /// Returns [`CodecError::InvalidMetadata`] if the version is not ICS-27 metadata.
    pub fn from_version(version: &str) -> Result<Self, CodecError> {
        from_json(version.as_bytes()).map_err(|e| CodecError::InvalidMetadata(e.to_string()))
    }

    /// Serializes the metadata into a channel version string.
    /// # Errors
    /// Returns an error if JSON serialization fails.
    pub fn to_version(&self) -> Result<String, CodecError> {
        Ok(to_json_string(self)?)
    }

    /// Checks the fields the outpost relies on.
    /// # Errors
    /// Returns [`CodecError::InvalidMetadata`] on the first unsupported field.
    pub fn validate(&self, controller_connection_id: &str) -> Result<(), CodecError> {
        if self.version != ICA_VERSION {
            return Err(CodecError::InvalidMetadata(format!(
                "version must be {ICA_VERSION}, got {}",
                self.version
            )));
        }
        if self.encoding != ENCODING_PROTO3 {
            return Err(CodecError::InvalidMetadata(format!(
                "unsupported encoding {}",
                self.encoding
            )));
        }
        if self.tx_type != TX_TYPE_SDK_MULTI_MSG {
            return Err(CodecError::InvalidMetadata(format!(
                "unsupported tx type {}",
                self.tx_type
            )));
        }
        if self.controller_connection_id != controller_connection_id {
            return Err(CodecError::InvalidMetadata(format!(
                "controller connection id mismatch: expected {controller_connection_id}, got {}",
                self.controller_connection_id
            )));
        }
        Ok(())
    }

    /// Returns the registered interchain account address, if the host filled it in.
    #[must_use]
    pub fn account_address(&self) -> Option<&str> {
        Some(self.address.as_str()).filter(|address| !address.is_empty())
    }
}
