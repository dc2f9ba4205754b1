//! Relays batches of messages to the interchain account.
//!
//! A batch is sent as an `IbcMsg::SendPacket` submessage. The packet sequence is only
//! known once the IBC module accepted the packet, so the batch travels to the reply
//! handler as submessage payload and is recorded there as [`BatchStatus::Pending`].

use cosmos_sdk_proto::cosmwasm::wasm::v1::MsgIbcSendResponse;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    from_json, to_json_binary, Addr, CosmosMsg, DepsMut, Env, Event, IbcMsg, MessageInfo, Reply,
    Response, Storage, SubMsg, SubMsgResponse, SubMsgResult,
};
use prost::Message;
use storage_outpost_ica::{message::ProtoMessage, packet::IcaPacketData};

use crate::{
    auth, channel,
    keys::{DEFAULT_TIMEOUT_SECONDS, MSG_IBC_SEND_RESPONSE_TYPE_URL, SEND_PACKET_REPLY_ID},
    msg::SendCosmosMsgsResponse,
    state::{BatchStatus, OutboundBatch, BATCHES, PENDING_BATCHES},
    ContractError,
};

/// The batch being submitted, carried from `execute` to `reply`.
#[cw_serde]
pub struct PendingSubmission {
    /// The channel the packet is sent over
    pub channel_id: String,
    /// The sender of the relay request
    pub submitted_by: Addr,
    /// The messages of the batch, in order
    pub messages: Vec<ProtoMessage>,
}

/// Sends `messages` to the interchain account as a single transaction.
/// # Errors
/// Returns [`ContractError::Unauthorized`] if the sender may not relay,
/// [`ContractError::ChannelNotReady`] if no account is bound to an open channel and
/// [`ContractError::InvalidArgument`] for a batch the host cannot execute.
#[allow(clippy::needless_pass_by_value)]
pub fn send_cosmos_msgs(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    messages: Vec<CosmosMsg>,
    packet_memo: Option<String>,
    timeout_seconds: Option<u64>,
) -> Result<Response, ContractError> {
    auth::authorize(deps.storage, &info.sender)?;

    let channel = channel::load(deps.storage)?;
    if !channel.is_ready_to_relay() {
        return Err(ContractError::ChannelNotReady);
    }
    let ica_address = channel::current_account_address(deps.storage)?;

    let timeout_seconds = timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS);
    if timeout_seconds == 0 {
        return Err(ContractError::InvalidArgument(
            "timeout_seconds must be positive".to_string(),
        ));
    }

    let messages = messages
        .into_iter()
        .map(|msg| ProtoMessage::try_from_cosmos_msg(msg, &ica_address))
        .collect::<Result<Vec<_>, _>>()?;
    let packet = IcaPacketData::encode(&messages, packet_memo)?;

    let send_packet = IbcMsg::SendPacket {
        channel_id: channel.channel_id.clone(),
        data: packet.to_json_binary()?,
        timeout: env.block.time.plus_seconds(timeout_seconds).into(),
    };
    let pending = PendingSubmission {
        channel_id: channel.channel_id.clone(),
        submitted_by: info.sender.clone(),
        messages,
    };

    let event = Event::new("outpost_send_packet")
        .add_attribute("channel_id", channel.channel_id)
        .add_attribute("message_count", pending.messages.len().to_string())
        .add_attribute("submitted_by", info.sender)
        .add_attribute("timeout_seconds", timeout_seconds.to_string());

    Ok(Response::new()
        .add_submessage(
            SubMsg::reply_always(send_packet, SEND_PACKET_REPLY_ID)
                .with_payload(to_json_binary(&pending)?),
        )
        .add_event(event)
        .add_attribute("action", "send_cosmos_msgs"))
}

/// Records the submitted batch once the IBC module returned its sequence.
/// # Errors
/// Returns [`ContractError::SubmissionFailed`] if the packet was not sent or no sequence
/// was returned, which reverts the whole relay request.
pub fn on_send_packet_reply(deps: DepsMut, reply: Reply) -> Result<Response, ContractError> {
    let response = match reply.result {
        SubMsgResult::Ok(response) => response,
        SubMsgResult::Err(err) => return Err(ContractError::SubmissionFailed(err)),
    };
    let sequence = sequence_from_response(&response)?;
    let pending: PendingSubmission = from_json(&reply.payload)?;

    record_batch(deps.storage, pending, sequence)?;

    Ok(Response::new()
        .set_data(to_json_binary(&SendCosmosMsgsResponse { sequence })?)
        .add_attribute("action", "record_batch")
        .add_attribute("sequence", sequence.to_string()))
}

fn record_batch(
    storage: &mut dyn Storage,
    pending: PendingSubmission,
    sequence: u64,
) -> Result<(), ContractError> {
    let key = (pending.channel_id.as_str(), sequence);
    if BATCHES.has(storage, key) {
        return Err(ContractError::SubmissionFailed(format!(
            "sequence {sequence} on {} is already recorded",
            pending.channel_id
        )));
    }

    let batch = OutboundBatch {
        sequence,
        channel_id: pending.channel_id.clone(),
        messages: pending.messages,
        status: BatchStatus::Pending,
        responses: vec![],
        submitted_by: pending.submitted_by,
    };
    BATCHES.save(storage, key, &batch)?;
    let pending_batches = PENDING_BATCHES.may_load(storage)?.unwrap_or_default();
    PENDING_BATCHES.save(storage, &(pending_batches + 1))?;

    Ok(())
}

#[allow(deprecated)]
fn sequence_from_response(response: &SubMsgResponse) -> Result<u64, ContractError> {
    let send_response = response
        .msg_responses
        .iter()
        .find(|msg_response| msg_response.type_url == MSG_IBC_SEND_RESPONSE_TYPE_URL)
        .map(|msg_response| msg_response.value.as_slice())
        .or_else(|| response.data.as_ref().map(|data| data.as_slice()))
        .ok_or_else(|| {
            ContractError::SubmissionFailed("no sequence in the send packet response".to_string())
        })?;

    MsgIbcSendResponse::decode(send_response)
        .map(|send_response| send_response.sequence)
        .map_err(|e| ContractError::SubmissionFailed(e.to_string()))
}
