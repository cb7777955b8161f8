#[macro_use]
extern crate serde;

mod eligibility;
mod error;
mod event;
mod hash;
mod identity;
mod instance;
mod ledger;
mod phase;

pub use eligibility::*;
pub use error::*;
pub use event::*;
pub use hash::*;
pub use identity::*;
pub use instance::*;
pub use ledger::*;
pub use phase::*;
