//! Decoding of the acknowledgements returned by the ICA host.

use cosmos_sdk_proto::cosmos::base::abci::v1beta1::TxMsgData;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{from_json, Binary, StdResult};
use prost::Message;

use crate::{message::ProtoMessage, CodecError};

/// The JSON acknowledgement written by ibc-go: `{"result": ...}` or `{"error": ...}`.
#[cw_serde]
pub enum AcknowledgementData {
    /// The protobuf encoded `TxMsgData` of the executed transaction
    Result(Binary),
    /// The error string of a failed transaction
    Error(String),
}

impl AcknowledgementData {
    /// Serializes the acknowledgement into its wire bytes.
    /// # Errors
    /// Returns an error if JSON serialization fails.
    pub fn to_json_binary(&self) -> StdResult<Binary> {
        cosmwasm_std::to_json_binary(self)
    }
}

/// The outcome of a single message of an acknowledged batch.
#[cw_serde]
pub enum MessageOutcome {
    /// The message response returned by the host
    Success(ProtoMessage),
    /// The message failed with the given reason
    Error(String),
}

/// Decodes acknowledgement bytes into one outcome per executed message, in order.
///
/// Hosts running SDK 0.46 or later report `msg_responses`; older hosts only fill the
/// deprecated `data` list, which is used as a fallback.
/// # Errors
/// Returns [`CodecError::RemoteExecutionFailed`] for a packet-level error acknowledgement
/// and [`CodecError::MalformedAcknowledgement`] if the bytes cannot be decoded.
pub fn decode_acknowledgement(ack: &[u8]) -> Result<Vec<MessageOutcome>, CodecError> {
    let ack_data: AcknowledgementData =
        from_json(ack).map_err(|e| CodecError::MalformedAcknowledgement(e.to_string()))?;

    match ack_data {
        AcknowledgementData::Error(reason) => Err(CodecError::RemoteExecutionFailed(reason)),
        AcknowledgementData::Result(result) => {
            let tx_msg_data = TxMsgData::decode(result.as_slice())
                .map_err(|e| CodecError::MalformedAcknowledgement(e.to_string()))?;
            Ok(outcomes(tx_msg_data))
        }
    }
}

#[allow(deprecated)]
fn outcomes(tx_msg_data: TxMsgData) -> Vec<MessageOutcome> {
    if tx_msg_data.msg_responses.is_empty() {
        return tx_msg_data
            .data
            .into_iter()
            .map(|msg_data| {
                MessageOutcome::Success(ProtoMessage::new(msg_data.msg_type, msg_data.data))
            })
            .collect();
    }

    tx_msg_data
        .msg_responses
        .into_iter()
        .map(|any| MessageOutcome::Success(ProtoMessage::new(any.type_url, any.value)))
        .collect()
}
