//! Protobuf messages executed by the interchain account.

use cosmos_sdk_proto::cosmos::{bank::v1beta1::MsgSend, base::v1beta1::Coin as ProtoCoin};
use cosmos_sdk_proto::cosmwasm::wasm::v1::MsgExecuteContract;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{BankMsg, Binary, Coin, CosmosMsg, WasmMsg};
use ibc_proto::google::protobuf::Any;
use prost::Message;

use crate::CodecError;

/// Type URL of the bank send message.
pub const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";
/// Type URL of the wasm execute message.
pub const MSG_EXECUTE_CONTRACT_TYPE_URL: &str = "/cosmwasm.wasm.v1.MsgExecuteContract";

/// A single message of a relay batch: a protobuf type URL and its encoded value.
#[cw_serde]
pub struct ProtoMessage {
    /// The protobuf type URL, e.g. `/cosmos.bank.v1beta1.MsgSend`
    pub type_url: String,
    /// The protobuf encoded message
    pub value: Binary,
}

impl ProtoMessage {
    /// Creates a new [`ProtoMessage`].
    pub fn new(type_url: impl Into<String>, value: impl Into<Binary>) -> Self {
        Self {
            type_url: type_url.into(),
            value: value.into(),
        }
    }

    /// Converts a [`CosmosMsg`] into the protobuf message the interchain account executes.
    ///
    /// `Any` and `Stargate` messages are passed through untouched. Bank sends and wasm
    /// executes are signed by `ica_address`.
    /// # Errors
    /// Returns [`CodecError::UnsupportedMessage`] for any other variant.
    #[allow(deprecated)]
    pub fn try_from_cosmos_msg(msg: CosmosMsg, ica_address: &str) -> Result<Self, CodecError> {
        match msg {
            CosmosMsg::Any(any) => Ok(Self::new(any.type_url, any.value)),
            CosmosMsg::Stargate { type_url, value } => Ok(Self::new(type_url, value)),
            CosmosMsg::Bank(BankMsg::Send { to_address, amount }) => {
                let msg_send = MsgSend {
                    from_address: ica_address.to_string(),
                    to_address,
                    amount: amount.into_iter().map(to_proto_coin).collect(),
                };
                Ok(Self::new(MSG_SEND_TYPE_URL, msg_send.encode_to_vec()))
            }
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr,
                msg,
                funds,
            }) => {
                let msg_execute = MsgExecuteContract {
                    sender: ica_address.to_string(),
                    contract: contract_addr,
                    msg: msg.to_vec(),
                    funds: funds.into_iter().map(to_proto_coin).collect(),
                };
                Ok(Self::new(
                    MSG_EXECUTE_CONTRACT_TYPE_URL,
                    msg_execute.encode_to_vec(),
                ))
            }
            other => Err(CodecError::UnsupportedMessage(format!("{other:?}"))),
        }
    }
}

impl From<ProtoMessage> for Any {
    fn from(msg: ProtoMessage) -> Self {
        Self {
            type_url: msg.type_url,
            value: msg.value.to_vec(),
        }
    }
}

impl From<Any> for ProtoMessage {
    fn from(any: Any) -> Self {
        Self::new(any.type_url, any.value)
    }
}

fn to_proto_coin(coin: Coin) -> ProtoCoin {
    ProtoCoin {
        denom: coin.denom,
        amount: coin.amount.to_string(),
    }
}
