pub mod homework;
pub mod i18n;
pub mod locale;
pub mod subject;

pub use homework::{HomeworkItem, ItemId, ItemState, SolveOutcome, SolveResult, Upload};
pub use i18n::translate;
pub use locale::{Locale, LocaleSetting};
pub use subject::Subject;
