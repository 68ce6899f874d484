mod categories;
mod questions;
mod quizzes;

use serde::Deserialize;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

#[derive(Deserialize)]
pub(crate) struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    pub(crate) fn page(&self) -> usize {
        crate::server::pagination::parse_page(self.page.as_deref())
    }
}
