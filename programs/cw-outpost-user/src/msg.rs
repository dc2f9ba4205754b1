//! # Messages

use cosmwasm_schema::{cw_serde, QueryResponses};
use cw_storage_outpost::msg::ExecuteMsg as OutpostExecuteMsg;

/// The message to instantiate the outpost user. The sender becomes the owner.
#[cw_serde]
pub struct InstantiateMsg {
    /// The outpost to forward messages to, can be saved later.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outpost: Option<String>,
}

/// The messages to execute the outpost user.
#[cw_serde]
pub enum ExecuteMsg {
    /// Saves the outpost address. Owner only.
    SaveOutpost {
        /// The outpost address
        address: String,
    },
    /// Forwards `msg` to the saved outpost. Owner only.
    CallOutpost {
        /// The message executed by the outpost
        msg: OutpostExecuteMsg,
    },
    /// Saves a note under the sender address.
    SaveNote {
        /// The note
        note: String,
    },
}

/// The messages to query the outpost user.
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the owner and the saved outpost.
    #[returns(crate::state::ContractState)]
    GetContractState {},
    /// Returns the note saved by `address`.
    #[returns(Option<String>)]
    GetNote {
        /// The address that saved the note
        address: String,
    },
    /// Returns the state of the saved outpost.
    #[returns(cw_storage_outpost::msg::ContractStateResponse)]
    OutpostState {},
}
