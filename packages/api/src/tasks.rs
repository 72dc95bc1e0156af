//! Task endpoints.

use store::{CreateTask, Task, TaskPage, TaskQueryParams, TaskStats, UpdateTask};

use crate::client::HttpClient;
use crate::error::ApiError;

const TASKS_PATH: &str = "/api/v1/tasks";
const STATS_PATH: &str = "/api/v1/tasks/stats";

fn task_path(id: &str) -> String {
    let id: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("{TASKS_PATH}/{id}")
}

#[derive(Debug, Clone)]
pub struct TaskService {
    client: HttpClient,
}

impl TaskService {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &TaskQueryParams) -> Result<TaskPage, ApiError> {
        let query = params.to_query();
        Ok(self.client.get_query(TASKS_PATH, &query).await?.data)
    }

    pub async fn get(&self, id: &str) -> Result<Task, ApiError> {
        Ok(self.client.get(&task_path(id)).await?.data)
    }

    pub async fn create(&self, task: &CreateTask) -> Result<Task, ApiError> {
        let created: Task = self.client.post(TASKS_PATH, task).await?.data;
        tracing::info!(id = %created.id, "task created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, changes: &UpdateTask) -> Result<Task, ApiError> {
        let updated: Task = self.client.patch(&task_path(id), changes).await?.data;
        tracing::info!(%id, "task updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&task_path(id)).await?;
        tracing::info!(%id, "task deleted");
        Ok(())
    }

    pub async fn stats(&self) -> Result<TaskStats, ApiError> {
        Ok(self.client.get(STATS_PATH).await?.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_escaped_in_paths() {
        assert_eq!(task_path("t-1"), "/api/v1/tasks/t-1");
        assert_eq!(task_path("a/b"), "/api/v1/tasks/a%2Fb");
    }
}
