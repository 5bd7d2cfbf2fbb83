use crate::error::SwimlaneError;

pub type SwimlaneResult<T> = Result<T, SwimlaneError>;
