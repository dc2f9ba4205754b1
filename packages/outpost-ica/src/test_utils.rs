//! A simulated ICA host used to exercise the codec and the contracts end to end.

use cosmos_sdk_proto::{cosmos::base::abci::v1beta1::TxMsgData, Any};
use cosmwasm_std::{from_json, Binary};
use prost::Message;

use crate::{ack::AcknowledgementData, packet::IcaPacketData};

/// Executes ICA packets the way an ibc-go host module would, without any chain state.
///
/// Every message succeeds with a response of type `<type_url>Response` echoing the
/// message value, unless its type URL was registered with [`MockIcaHost::failing_on`],
/// in which case the whole transaction fails with a packet-level error acknowledgement.
#[derive(Clone, Debug, Default)]
pub struct MockIcaHost {
    failing: Vec<String>,
}

impl MockIcaHost {
    /// Makes every transaction containing a message of `type_url` fail.
    #[must_use]
    pub fn failing_on(mut self, type_url: impl Into<String>) -> Self {
        self.failing.push(type_url.into());
        self
    }

    /// Executes the packet bytes and returns the acknowledgement bytes.
    ///
    /// # Panics
    /// Panics if the acknowledgement cannot be serialized.
    #[must_use]
    pub fn execute(&self, packet: &[u8]) -> Binary {
        self.acknowledge(packet)
            .to_json_binary()
            .expect("acknowledgement serializes")
    }

    fn acknowledge(&self, packet: &[u8]) -> AcknowledgementData {
        let messages = match from_json::<IcaPacketData>(packet).map(|p| p.messages()) {
            Ok(Ok(messages)) => messages,
            Ok(Err(e)) => return AcknowledgementData::Error(e.to_string()),
            Err(e) => return AcknowledgementData::Error(e.to_string()),
        };

        if let Some(msg) = messages
            .iter()
            .find(|msg| self.failing.contains(&msg.type_url))
        {
            return AcknowledgementData::Error(format!(
                "ABCI code: 1: error handling packet: {} failed",
                msg.type_url
            ));
        }

        #[allow(deprecated)]
        let tx_msg_data = TxMsgData {
            data: vec![],
            msg_responses: messages
                .into_iter()
                .map(|msg| Any {
                    type_url: format!("{}Response", msg.type_url),
                    value: msg.value.to_vec(),
                })
                .collect(),
        };

        AcknowledgementData::Result(tx_msg_data.encode_to_vec().into())
    }
}
