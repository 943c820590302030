//! Admin view registry.
//!
//! `build_admin` composes the fixed set of views the admin surface exposes.
//! Model views also carry the columns a list request may sort, search and
//! filter on; `ModelView::query` turns a raw request into a typed
//! [`ListQuery`] and rejects anything the view does not list.

use std::path::{Path, PathBuf};

use modmaker_domain::{FilterOp, ListColumn, ListQuery, SortOrder, DEFAULT_PAGE_SIZE};

use crate::use_cases::validation::{require_listed_column, ValidationError};

pub const ADMIN_TITLE: &str = "civ-modmaker";

/// Columns a model view exposes for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelView {
    pub entity: &'static str,
    pub sortable: &'static [&'static str],
    pub searchable: &'static [&'static str],
    pub filters: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    Model(ModelView),
    /// Registered, but the output format is not defined.
    Export,
    Files { root: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDescriptor {
    pub name: &'static str,
    pub category: &'static str,
    pub endpoint: &'static str,
    pub kind: ViewKind,
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("View endpoint '{0}' is already registered")]
    DuplicateEndpoint(&'static str),
}

#[derive(Debug, Clone)]
pub struct AdminRegistry {
    title: String,
    views: Vec<ViewDescriptor>,
}

impl AdminRegistry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            views: Vec::new(),
        }
    }

    pub fn add_view(&mut self, view: ViewDescriptor) -> Result<(), AdminError> {
        if self.view(view.endpoint).is_some() {
            return Err(AdminError::DuplicateEndpoint(view.endpoint));
        }
        self.views.push(view);
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn views(&self) -> &[ViewDescriptor] {
        &self.views
    }

    pub fn view(&self, endpoint: &str) -> Option<&ViewDescriptor> {
        self.views.iter().find(|v| v.endpoint == endpoint)
    }

    pub fn model(&self, endpoint: &str) -> Option<&ModelView> {
        match &self.view(endpoint)?.kind {
            ViewKind::Model(model) => Some(model),
            _ => None,
        }
    }
}

/// Build the admin surface: two world views, two component views, the
/// export placeholder and the resource file manager.
pub fn build_admin(resource_dir: &Path) -> Result<AdminRegistry, AdminError> {
    let mut admin = AdminRegistry::new(ADMIN_TITLE);

    admin.add_view(ViewDescriptor {
        name: "Leaders",
        category: "World",
        endpoint: "leader",
        kind: ViewKind::Model(ModelView {
            entity: "leader",
            sortable: &["name", "civilization", "description"],
            searchable: &["description", "name", "civilization"],
            filters: &["civilization", "name"],
        }),
    })?;
    admin.add_view(ViewDescriptor {
        name: "Civilizations",
        category: "World",
        endpoint: "civilization",
        kind: ViewKind::Model(ModelView {
            entity: "civilization",
            sortable: &["name", "description"],
            searchable: &["name", "description"],
            filters: &["name", "description"],
        }),
    })?;
    admin.add_view(ViewDescriptor {
        name: "Leader Traits",
        category: "Components",
        endpoint: "trait",
        kind: ViewKind::Model(ModelView {
            entity: "trait",
            sortable: &["name"],
            searchable: &["name"],
            filters: &["name"],
        }),
    })?;
    admin.add_view(ViewDescriptor {
        name: "Leader Flaws",
        category: "Components",
        endpoint: "flaw",
        kind: ViewKind::Model(ModelView {
            entity: "flaw",
            sortable: &["name"],
            searchable: &["name"],
            filters: &["name"],
        }),
    })?;
    admin.add_view(ViewDescriptor {
        name: "Export",
        category: "Management",
        endpoint: "export",
        kind: ViewKind::Export,
    })?;
    admin.add_view(ViewDescriptor {
        name: "Resources",
        category: "Components",
        endpoint: "resources",
        kind: ViewKind::Files {
            root: resource_dir.to_path_buf(),
        },
    })?;

    tracing::debug!(views = admin.views().len(), "Admin views registered");
    Ok(admin)
}

// =============================================================================
// List requests
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub column: String,
    pub op: String,
    pub value: String,
}

/// An unvalidated list request as it arrives from a client. Pages are
/// zero-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub filters: Vec<FilterRequest>,
}

impl ModelView {
    pub fn query<C: ListColumn>(
        &self,
        request: &ListRequest,
    ) -> Result<ListQuery<C>, ValidationError> {
        let mut query = ListQuery::new().paged(
            request.page.unwrap_or(0),
            request.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        );

        if let Some(term) = &request.search {
            let columns = self
                .searchable
                .iter()
                .map(|column| self.column::<C>(column))
                .collect::<Result<Vec<_>, _>>()?;
            query = query.with_search(term.as_str()).search_in(columns);
        }

        if let Some(sort) = &request.sort {
            require_listed_column(self.entity, sort, self.sortable, "sorting")?;
            let order = match &request.order {
                Some(order) => order
                    .parse::<SortOrder>()
                    .map_err(|e| ValidationError::Invalid {
                        field_name: "order",
                        reason: e.to_string(),
                    })?,
                None => SortOrder::Ascending,
            };
            query = query.sorted_by(self.column::<C>(sort)?, order);
        }

        for filter in &request.filters {
            require_listed_column(self.entity, &filter.column, self.filters, "filtering")?;
            let op = filter
                .op
                .parse::<FilterOp>()
                .map_err(|e| ValidationError::Invalid {
                    field_name: "filter operation",
                    reason: e.to_string(),
                })?;
            query = query.with_filter(self.column::<C>(&filter.column)?, op, filter.value.as_str());
        }

        Ok(query)
    }

    fn column<C: ListColumn>(&self, name: &str) -> Result<C, ValidationError> {
        C::parse_column(name).map_err(|e| ValidationError::Invalid {
            field_name: "column",
            reason: e.to_string(),
        })
    }
}
