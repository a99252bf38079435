// achem-domain library entry point
pub mod errors;
pub mod reaction;
pub mod species;
pub mod template;

pub use errors::DomainError;
pub use reaction::{CatalyzerAssignment, CleavageReaction, CondensationReaction, ReactionKey};
pub use species::Species;
pub use template::{CleavageTemplate, CondensationTemplate};
