pub use crate::error::{Error, Result};
pub use crate::inference::Infer;
pub use crate::model::Model;
pub use crate::observable::{load_pedigree, CsvBuilder};
pub use crate::report::Report;
pub use crate::{GeneCount, Pedigree, Person};
