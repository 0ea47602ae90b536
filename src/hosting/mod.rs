//! Code-hosting collaborator: repository identification, a thin GitHub REST
//! client, and a shallow-clone helper.

mod client;
mod git;
mod repo_spec;

pub use client::HostingClient;
pub use git::shallow_clone;
pub use repo_spec::RepoSpec;
