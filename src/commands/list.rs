use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::remote::EventApi;

use super::{FilterOptions, open_session, print_json, print_page};

/// Show one page of security events matching the filter
pub async fn cmd_list<A: EventApi + 'static>(
    api: Arc<A>,
    config: &Config,
    filter: &FilterOptions,
    output_json: bool,
) -> Result<()> {
    let session = open_session(api, config, filter).await?;

    if output_json {
        return print_json(session.controller());
    }
    print_page(session.controller());
    Ok(())
}
