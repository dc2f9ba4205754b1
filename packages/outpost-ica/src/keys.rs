//! Constants of the ICS-27 application used by the outpost.

/// The ICS-27 version negotiated in the channel metadata.
pub const ICA_VERSION: &str = "ics27-1";

/// The port the interchain accounts host submodule binds to.
pub const HOST_PORT_ID: &str = "icahost";

/// The only tx encoding supported by the outpost.
pub const ENCODING_PROTO3: &str = "proto3";

/// The only tx type supported by ICS-27.
pub const TX_TYPE_SDK_MULTI_MSG: &str = "sdk_multi_msg";

/// `Type::ExecuteTx` of `InterchainAccountPacketData`.
pub const EXECUTE_TX_PACKET_TYPE: u32 = 1;

/// ibc-go rejects packets whose memo is longer than this many bytes.
pub const MAX_MEMO_CHAR_LENGTH: usize = 256;
