//! ICS-27 packet data sent from the controller to the host.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, StdResult};
use ibc_proto::{google::protobuf::Any, ibc::applications::interchain_accounts::v1::CosmosTx};
use prost::Message;

use crate::{
    keys::{EXECUTE_TX_PACKET_TYPE, MAX_MEMO_CHAR_LENGTH},
    message::ProtoMessage,
    CodecError,
};

/// The JSON form of `InterchainAccountPacketData` understood by ibc-go hosts.
///
/// `data` holds a protobuf `CosmosTx` whose messages are executed atomically and
/// in order by the interchain account.
#[cw_serde]
pub struct IcaPacketData {
    /// The packet type, always `TYPE_EXECUTE_TX`
    pub r#type: u32,
    /// The protobuf encoded `CosmosTx`
    pub data: Binary,
    /// The memo forwarded with the packet
    pub memo: String,
}

impl IcaPacketData {
    /// Encodes an ordered batch of messages into a single packet.
    /// # Errors
    /// Returns [`CodecError::EmptyBatch`] if `messages` is empty and
    /// [`CodecError::MemoTooLong`] if the memo exceeds the host limit.
    pub fn encode(messages: &[ProtoMessage], memo: Option<String>) -> Result<Self, CodecError> {
        if messages.is_empty() {
            return Err(CodecError::EmptyBatch);
        }

        let memo = memo.unwrap_or_default();
        let memo_len = memo.len();
        if memo_len > MAX_MEMO_CHAR_LENGTH {
            return Err(CodecError::MemoTooLong {
                len: memo_len,
                max: MAX_MEMO_CHAR_LENGTH,
            });
        }

        let cosmos_tx = CosmosTx {
            messages: messages.iter().cloned().map(Any::from).collect(),
        };

        Ok(Self {
            r#type: EXECUTE_TX_PACKET_TYPE,
            data: cosmos_tx.encode_to_vec().into(),
            memo,
        })
    }

    /// Serializes the packet into the bytes put on the wire.
    /// # Errors
    /// Returns an error if JSON serialization fails.
    pub fn to_json_binary(&self) -> StdResult<Binary> {
        cosmwasm_std::to_json_binary(self)
    }

    /// Decodes the messages carried by the packet, in order.
    /// # Errors
    /// Returns an error if `data` is not a protobuf `CosmosTx`.
    pub fn messages(&self) -> Result<Vec<ProtoMessage>, CodecError> {
        let cosmos_tx = CosmosTx::decode(self.data.as_slice())?;
        Ok(cosmos_tx
            .messages
            .into_iter()
            .map(ProtoMessage::from)
            .collect())
    }
}
