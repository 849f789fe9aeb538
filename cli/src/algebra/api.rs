use entities::{
    Account, AutoError, Balance, Card, CreateTaskRequest, Page, PageQuery, Task, TaskQuery, Unit,
};

/// The slice of the backend REST API the task workflow talks to.
pub trait TaskApi: Send + Sync {
    fn list_tasks(
        &self,
        query: &TaskQuery,
    ) -> impl Future<Output = Result<Page<Task>, AutoError>> + Send;

    fn get_task(&self, id: u64) -> impl Future<Output = Result<Task, AutoError>> + Send;

    fn create_task(
        &self,
        request: &CreateTaskRequest,
    ) -> impl Future<Output = Result<Task, AutoError>> + Send;

    fn cancel_task(&self, id: u64) -> impl Future<Output = Result<Unit, AutoError>> + Send;

    fn delete_task(&self, id: u64) -> impl Future<Output = Result<Unit, AutoError>> + Send;

    fn list_accounts(
        &self,
        query: &PageQuery,
    ) -> impl Future<Output = Result<Page<Account>, AutoError>> + Send;

    fn list_cards(
        &self,
        query: &PageQuery,
    ) -> impl Future<Output = Result<Page<Card>, AutoError>> + Send;

    fn balance(&self) -> impl Future<Output = Result<Balance, AutoError>> + Send;
}
