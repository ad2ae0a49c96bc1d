mod page;
mod queue;
mod rank;
mod section;
mod sort;

pub use page::{FlushOutcome, InstalledPage, InstalledRow, ListedRow, LoadError};
pub use queue::RefreshQueue;
pub use rank::{StateGroup, compulsory_rank, kind_rank};
pub use section::{Boundary, Section, SectionLabels, boundaries, section, section_boundary};
pub use sort::{SortKey, compare, sort_key, sort_records};
