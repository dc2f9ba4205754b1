//! Helpers for working with the outpost from other contracts.

use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, WasmMsg};

use crate::{
    msg::{ContractStateResponse, ExecuteMsg, QueryMsg},
    state::OutboundBatch,
};

/// `OutpostContract` is a wrapper around [`Addr`] that provides helpers
/// for working with a deployed outpost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutpostContract(pub Addr);

impl OutpostContract {
    /// Creates a new [`OutpostContract`].
    #[must_use]
    pub const fn new(addr: Addr) -> Self {
        Self(addr)
    }

    /// Returns the address of the outpost.
    #[must_use]
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    /// Creates a [`WasmMsg::Execute`] message targeting the outpost.
    /// # Errors
    /// Returns an error if the message cannot be serialized.
    pub fn call(&self, msg: impl Into<ExecuteMsg>) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg: to_json_binary(&msg.into())?,
            funds: vec![],
        }
        .into())
    }

    /// Queries the state of the outpost.
    /// # Errors
    /// Returns an error if the query fails.
    pub fn query_state(&self, querier: QuerierWrapper) -> StdResult<ContractStateResponse> {
        querier.query_wasm_smart(self.addr(), &QueryMsg::GetContractState {})
    }

    /// Queries a relayed batch.
    /// # Errors
    /// Returns an error if the query fails or the batch does not exist.
    pub fn query_batch(
        &self,
        querier: QuerierWrapper,
        channel_id: Option<String>,
        sequence: u64,
    ) -> StdResult<OutboundBatch> {
        querier.query_wasm_smart(
            self.addr(),
            &QueryMsg::GetBatch {
                channel_id,
                sequence,
            },
        )
    }
}
