use super::{ApiClient, Page};
use crate::error::Error;
use crate::project::Project;
use log::*;

impl ApiClient {
    /// Fetch every page of `GET projects`, starting at page 1, until the reported
    /// total page count is reached. Any failed page fails the whole listing.
    pub async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        let mut projects = Vec::new();
        let mut page = 1;
        loop {
            let response: Page<Project> = self
                .get(&format!("projects?page={page}"), "projects")
                .await?;
            debug!(
                "Fetched projects page {page}/{} ({} projects)",
                response.pagination.total_pages,
                response.data.len()
            );

            let is_last = response.is_last(page);
            projects.extend(response.data);
            if is_last {
                return Ok(projects);
            }
            page += 1;
        }
    }
}
