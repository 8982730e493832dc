use structopt::StructOpt;

use crate::command::admin::Action;

/// Manage records as the site administrator
#[derive(StructOpt, Debug)]
pub enum Admin {
    /// List records matching a search
    #[structopt(alias = "ls")]
    List {
        /// Free text search
        query: Option<String>,
    },

    /// Create a record
    Add {
        /// Field values as field=value, lists are comma separated
        #[structopt(short = "s", long = "set")]
        fields: Vec<String>,
    },

    /// Change fields of a record
    Update {
        /// Record identifier
        id: u64,

        /// Field values as field=value, lists are comma separated
        #[structopt(short = "s", long = "set")]
        fields: Vec<String>,
    },

    /// Delete a record
    #[structopt(alias = "rm")]
    Delete {
        /// Record identifier
        id: u64,

        /// Confirm the deletion
        #[structopt(short, long)]
        yes: bool,
    },
}

impl From<Admin> for Action {
    fn from(admin: Admin) -> Self {
        match admin {
            Admin::List { query } => Action::List {
                query: query.unwrap_or_default(),
            },
            Admin::Add { fields } => Action::Add { fields },
            Admin::Update { id, fields } => Action::Update { id, fields },
            Admin::Delete { id, yes } => Action::Delete { id, confirmed: yes },
        }
    }
}
