//! Project domain services.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::mapping::map_project_persistence_error;
use crate::domain::ports::{
    CreateProjectRequest, ProjectCommand, ProjectPatch, ProjectRepository, ProjectsQuery,
    UpdateProjectRequest,
};
use crate::domain::project::{Project, ProjectDraft};

/// Project service implementing the command driving port.
#[derive(Clone)]
pub struct ProjectCommandService<P> {
    projects: Arc<P>,
}

impl<P> ProjectCommandService<P> {
    /// Create a new command service over project storage.
    pub fn new(projects: Arc<P>) -> Self {
        Self { projects }
    }
}

#[async_trait]
impl<P> ProjectCommand for ProjectCommandService<P>
where
    P: ProjectRepository,
{
    async fn create_project(&self, request: CreateProjectRequest) -> Result<Project, Error> {
        let project = Project::new(ProjectDraft {
            id: Uuid::new_v4(),
            name: request.name,
            description: request.description,
            window: request.window,
            required_skills: request.required_skills,
            team_size: request.team_size,
            status: request.status,
            manager_id: request.manager_id,
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.projects
            .insert(&project)
            .await
            .map_err(map_project_persistence_error)?;

        Ok(project)
    }

    async fn update_project(
        &self,
        id: Uuid,
        request: UpdateProjectRequest,
    ) -> Result<Project, Error> {
        if request.name.trim().is_empty() {
            return Err(Error::invalid_request("project name must not be empty"));
        }
        if request.team_size < 1 {
            return Err(Error::invalid_request("team size must be at least 1"));
        }

        let patch = ProjectPatch {
            name: request.name,
            description: request.description,
            window: request.window,
            required_skills: request.required_skills,
            team_size: request.team_size,
            status: request.status,
        };

        self.projects
            .update(id, &patch)
            .await
            .map_err(map_project_persistence_error)?
            .ok_or_else(|| Error::not_found("Project not found"))
    }
}

/// Project service implementing the query driving port.
#[derive(Clone)]
pub struct ProjectsQueryService<P> {
    projects: Arc<P>,
}

impl<P> ProjectsQueryService<P> {
    /// Create a new query service over project storage.
    pub fn new(projects: Arc<P>) -> Self {
        Self { projects }
    }
}

#[async_trait]
impl<P> ProjectsQuery for ProjectsQueryService<P>
where
    P: ProjectRepository,
{
    async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        self.projects
            .list()
            .await
            .map_err(map_project_persistence_error)
    }

    async fn get_project(&self, id: Uuid) -> Result<Project, Error> {
        self.projects
            .find_by_id(id)
            .await
            .map_err(map_project_persistence_error)?
            .ok_or_else(|| Error::not_found("Project not found"))
    }
}
