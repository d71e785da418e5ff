pub use crate::domain::actor::Actor;
pub use crate::domain::availability::{AvailabilityLoadError, RefereeAvailability};
pub use crate::domain::tournament::{Tournament, TournamentLoadError};
pub use crate::policy::eligibility::{check_assignment, AssignmentContext, AssignmentRefusal};
pub use crate::policy::notification::MailboxRoute;
pub use crate::policy::visibility::{TournamentScope, UserScope};
pub use crate::schema::assignment::{AssignmentRole, AssignmentStatus};
pub use crate::schema::tournament::TournamentStatus;
pub use crate::schema::user::{RefereeLevel, UserType};
