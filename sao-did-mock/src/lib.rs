mod controlled_sid;
mod mock_provider;
mod mock_sid_ledger;
mod replaying_provider;
mod tampering_provider;

pub use crate::{
    controlled_sid::{encode_key, ControlledSID},
    mock_provider::MockProvider,
    mock_sid_ledger::MockSIDLedger,
    replaying_provider::ReplayingProvider,
    tampering_provider::{Tampering, TamperingProvider},
};
