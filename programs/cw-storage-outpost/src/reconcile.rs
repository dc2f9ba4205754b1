//! Finalizes relayed batches once the host acknowledged their packet or it timed out.

use cosmwasm_std::{Binary, DepsMut, Event, IbcBasicResponse};
use storage_outpost_ica::ack::{decode_acknowledgement, MessageOutcome};

use crate::{
    keys::TIMEOUT_REASON,
    state::{BatchStatus, OutboundBatch, BATCHES, PENDING_BATCHES},
    ContractError,
};

/// What happened to a relayed packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PacketOutcome {
    /// The host wrote this acknowledgement.
    Acknowledged(Binary),
    /// The packet timed out.
    TimedOut,
}

/// Applies the outcome of the packet `(channel_id, sequence)` to its batch.
///
/// Outcomes for unknown packets and repeated outcomes for finalized batches leave the
/// state untouched and are reported with an `anomaly` attribute.
/// # Errors
/// Returns an error if storage fails.
pub fn reconcile(
    deps: DepsMut,
    channel_id: &str,
    sequence: u64,
    outcome: PacketOutcome,
) -> Result<IbcBasicResponse, ContractError> {
    let event = Event::new("outpost_reconcile")
        .add_attribute("channel_id", channel_id)
        .add_attribute("sequence", sequence.to_string());

    let Some(batch) = BATCHES.may_load(deps.storage, (channel_id, sequence))? else {
        deps.api.debug(&format!(
            "outpost: no batch for packet {sequence} on {channel_id}"
        ));
        return Ok(IbcBasicResponse::new().add_event(event.add_attribute("anomaly", "unknown_packet")));
    };
    if batch.is_finalized() {
        deps.api.debug(&format!(
            "outpost: batch {sequence} on {channel_id} is already finalized"
        ));
        return Ok(IbcBasicResponse::new()
            .add_event(event.add_attribute("anomaly", "duplicate_delivery")));
    }

    let batch = finalize(batch, outcome);
    BATCHES.save(deps.storage, (channel_id, sequence), &batch)?;
    let pending_batches = PENDING_BATCHES.may_load(deps.storage)?.unwrap_or_default();
    PENDING_BATCHES.save(deps.storage, &pending_batches.saturating_sub(1))?;

    let event = match &batch.status {
        BatchStatus::Failed { reason } => event
            .add_attribute("status", "failed")
            .add_attribute("reason", reason),
        _ => event.add_attribute("status", "succeeded"),
    };

    Ok(IbcBasicResponse::new().add_event(event))
}

fn finalize(batch: OutboundBatch, outcome: PacketOutcome) -> OutboundBatch {
    let (status, responses) = match outcome {
        PacketOutcome::TimedOut => (
            BatchStatus::Failed {
                reason: TIMEOUT_REASON.to_string(),
            },
            vec![],
        ),
        PacketOutcome::Acknowledged(ack) => match decode_acknowledgement(&ack) {
            Ok(outcomes) => {
                let mut responses = Vec::with_capacity(outcomes.len());
                let mut failure = None;
                for outcome in outcomes {
                    match outcome {
                        MessageOutcome::Success(response) => responses.push(response),
                        MessageOutcome::Error(reason) => {
                            failure.get_or_insert(reason);
                        }
                    }
                }
                match failure {
                    Some(reason) => (BatchStatus::Failed { reason }, vec![]),
                    None => (BatchStatus::Succeeded, responses),
                }
            }
            Err(e) => (
                BatchStatus::Failed {
                    reason: e.to_string(),
                },
                vec![],
            ),
        },
    };

    OutboundBatch {
        status,
        responses,
        ..batch
    }
}
