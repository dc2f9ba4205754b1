//! Test helpers for the outpost contract

use cosmwasm_std::testing::{
    message_info, mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage,
};
use cosmwasm_std::{
    from_json, Addr, AnyMsg, Binary, CosmosMsg, Empty, IbcAcknowledgement, IbcBasicResponse, IbcChannel,
    IbcChannelConnectMsg, IbcChannelOpenMsg, IbcEndpoint, IbcMsg, IbcOrder, IbcPacket,
    IbcPacketAckMsg, IbcPacketTimeoutMsg, IbcTimeout, MsgResponse, OwnedDeps, Reply, Response,
    SubMsgResponse, SubMsgResult,
};
use cosmos_sdk_proto::cosmwasm::wasm::v1::MsgIbcSendResponse;
use cosmwasm_schema::serde::de::DeserializeOwned;
use prost::Message;
use storage_outpost_ica::metadata::IcaMetadata;

use crate::{
    contract, ibc,
    keys::MSG_IBC_SEND_RESPONSE_TYPE_URL,
    msg::{ExecuteMsg, InstantiateMsg, QueryMsg},
    ContractError,
};

/// Mock dependencies of the outpost tests
pub type MockDeps = OwnedDeps<MockStorage, MockApi, MockQuerier, Empty>;

/// The controller channel
pub const CHANNEL_ID: &str = "channel-0";
/// The controller connection
pub const CONNECTION_ID: &str = "connection-0";
/// The host channel
pub const COUNTERPARTY_CHANNEL_ID: &str = "channel-5";
/// The host connection
pub const COUNTERPARTY_CONNECTION_ID: &str = "connection-1";
/// The interchain account created by the host
pub const ICA_ADDRESS: &str = "jkl1wxyhvqemlzcj8a8xg8sh3ws4vdrvk5ykgkrn3u7k4kzxs0xvd88qhhhz0p";

/// Mock dependencies for testing
#[must_use]
pub fn mk_deps() -> MockDeps {
    mock_dependencies()
}

/// Instantiates an outpost owned by `owner` and returns the owner address
pub fn setup(deps: &mut MockDeps) -> Addr {
    let owner = deps.api.addr_make("owner");
    contract::instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&owner, &[]),
        InstantiateMsg {
            owner: None,
            delegates: None,
            channel_open_init_options: None,
        },
    )
    .unwrap();
    owner
}

/// The ICA channel as seen by the outpost
#[must_use]
pub fn ica_channel(channel_id: &str, order: IbcOrder, version: &str) -> IbcChannel {
    IbcChannel::new(
        IbcEndpoint {
            port_id: format!("wasm.{}", mock_env().contract.address),
            channel_id: channel_id.to_string(),
        },
        IbcEndpoint {
            port_id: "icahost".to_string(),
            channel_id: COUNTERPARTY_CHANNEL_ID.to_string(),
        },
        order,
        version,
        CONNECTION_ID,
    )
}

/// The version proposed by the outpost
#[must_use]
pub fn controller_version() -> String {
    IcaMetadata::new(CONNECTION_ID, COUNTERPARTY_CONNECTION_ID)
        .to_version()
        .unwrap()
}

/// The version returned by the host once it registered `ica_address`
#[must_use]
pub fn host_version(ica_address: &str) -> String {
    let mut metadata = IcaMetadata::new(CONNECTION_ID, COUNTERPARTY_CONNECTION_ID);
    metadata.address = ica_address.to_string();
    metadata.to_version().unwrap()
}

/// Runs `ChanOpenInit` for `channel_id`
pub fn start_handshake(deps: &mut MockDeps, channel_id: &str, order: IbcOrder) {
    let channel = ica_channel(channel_id, order, &controller_version());
    ibc::ibc_channel_open(
        deps.as_mut(),
        mock_env(),
        IbcChannelOpenMsg::new_init(channel),
    )
    .unwrap();
}

/// Runs `ChanOpenAck` for `channel_id`, registering `ica_address`
pub fn complete_handshake(
    deps: &mut MockDeps,
    channel_id: &str,
    order: IbcOrder,
    ica_address: &str,
) -> Result<IbcBasicResponse, ContractError> {
    let channel = ica_channel(channel_id, order, &controller_version());
    ibc::ibc_channel_connect(
        deps.as_mut(),
        mock_env(),
        IbcChannelConnectMsg::new_ack(channel, host_version(ica_address)),
    )
}

/// Opens an ordered ICA channel bound to [`ICA_ADDRESS`]
pub fn open_channel(deps: &mut MockDeps) {
    start_handshake(deps, CHANNEL_ID, IbcOrder::Ordered);
    complete_handshake(deps, CHANNEL_ID, IbcOrder::Ordered, ICA_ADDRESS).unwrap();
}

/// The response wasmd returns for a sent packet
#[must_use]
#[allow(deprecated)]
pub fn send_packet_response(sequence: u64) -> SubMsgResponse {
    SubMsgResponse {
        events: vec![],
        data: None,
        msg_responses: vec![MsgResponse {
            type_url: MSG_IBC_SEND_RESPONSE_TYPE_URL.to_string(),
            value: MsgIbcSendResponse { sequence }.encode_to_vec().into(),
        }],
    }
}

/// A packet the outpost sent
#[derive(Debug)]
pub struct SentPacket {
    /// The packet data
    pub data: Binary,
    /// The packet timeout
    pub timeout: IbcTimeout,
    /// The response of the reply handler
    pub reply: Response,
}

/// Executes `SendCosmosMsgs` as `sender` and lets the IBC module assign `sequence`
pub fn submit(
    deps: &mut MockDeps,
    sender: &Addr,
    msg: ExecuteMsg,
    sequence: u64,
) -> Result<SentPacket, ContractError> {
    let res = contract::execute(deps.as_mut(), mock_env(), message_info(sender, &[]), msg)?;
    assert_eq!(res.messages.len(), 1);

    let sub_msg = &res.messages[0];
    let CosmosMsg::Ibc(IbcMsg::SendPacket {
        channel_id,
        data,
        timeout,
    }) = &sub_msg.msg
    else {
        panic!("expected a send packet submessage, got {:?}", sub_msg.msg);
    };
    assert_eq!(channel_id, CHANNEL_ID);

    let reply = contract::reply(
        deps.as_mut(),
        mock_env(),
        Reply {
            id: sub_msg.id,
            payload: sub_msg.payload.clone(),
            gas_used: 0,
            result: SubMsgResult::Ok(send_packet_response(sequence)),
        },
    )?;

    Ok(SentPacket {
        data: data.clone(),
        timeout: timeout.clone(),
        reply,
    })
}

/// A `SendCosmosMsgs` message with the default memo and timeout
#[must_use]
pub fn send_msgs(messages: Vec<CosmosMsg>) -> ExecuteMsg {
    ExecuteMsg::SendCosmosMsgs {
        messages,
        packet_memo: None,
        timeout_seconds: None,
    }
}

fn packet(sequence: u64, data: Binary) -> IbcPacket {
    IbcPacket::new(
        data,
        IbcEndpoint {
            port_id: format!("wasm.{}", mock_env().contract.address),
            channel_id: CHANNEL_ID.to_string(),
        },
        IbcEndpoint {
            port_id: "icahost".to_string(),
            channel_id: COUNTERPARTY_CHANNEL_ID.to_string(),
        },
        sequence,
        mock_env().block.time.plus_seconds(600).into(),
    )
}

/// Delivers the acknowledgement of packet `sequence`
pub fn acknowledge(
    deps: &mut MockDeps,
    sequence: u64,
    data: Binary,
    ack: Binary,
) -> Result<IbcBasicResponse, ContractError> {
    let relayer = deps.api.addr_make("relayer");
    ibc::ibc_packet_ack(
        deps.as_mut(),
        mock_env(),
        IbcPacketAckMsg::new(
            IbcAcknowledgement::new(ack),
            packet(sequence, data),
            relayer,
        ),
    )
}

/// Delivers the timeout of packet `sequence`
pub fn time_out(
    deps: &mut MockDeps,
    sequence: u64,
    data: Binary,
) -> Result<IbcBasicResponse, ContractError> {
    let relayer = deps.api.addr_make("relayer");
    ibc::ibc_packet_timeout(
        deps.as_mut(),
        mock_env(),
        IbcPacketTimeoutMsg::new(packet(sequence, data), relayer),
    )
}

/// Runs a query against the outpost
pub fn query<T: DeserializeOwned>(deps: &MockDeps, msg: QueryMsg) -> T {
    from_json(contract::query(deps.as_ref(), mock_env(), msg).unwrap()).unwrap()
}

/// A storage chain message the tests relay
#[must_use]
pub fn post_file() -> CosmosMsg {
    CosmosMsg::Any(AnyMsg {
        type_url: "/canine_chain.storage.MsgPostFile".to_string(),
        value: Binary::from(b"merkle".to_vec()),
    })
}

/// A second storage chain message the tests relay
#[must_use]
pub fn post_key() -> CosmosMsg {
    CosmosMsg::Any(AnyMsg {
        type_url: "/canine_chain.filetree.MsgPostKey".to_string(),
        value: Binary::from(b"key".to_vec()),
    })
}
