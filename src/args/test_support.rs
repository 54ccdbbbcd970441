use clap::Parser;

use crate::error::{AppError, AppResult};

use super::ClientArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<ClientArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    ClientArgs::try_parse_from(args).map_err(AppError::from)
}
