pub mod commit_details;
pub mod commit_rebase;
pub mod executors;
pub mod fixup_action;
pub mod message;
pub mod model;
pub mod partition;
pub mod registry;
pub mod repo_state;
pub mod uncommitted;
pub mod upstream;


#[cfg(test)]
mod commit_rebase_test;



#[cfg(test)]
mod partition_test;
