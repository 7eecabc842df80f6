use git2::{ErrorCode, ObjectType, Repository};

use crate::error::Result;
use crate::git::command::CommandRunner;
use crate::git::repository::WikiRepository;

const PAGE_EXTENSION: &str = ".md";

impl<R: CommandRunner + ?Sized> WikiRepository<'_, R> {
    /// Markdown pages tracked at HEAD, without extension, sorted case-insensitively.
    pub fn list_pages(&self) -> Result<Vec<String>> {
        let repo = Repository::open(&self.path)?;
        let head = match repo.head() {
            Ok(head) => head,
            // Freshly created wiki without any page yet
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let tree = head.peel_to_commit()?.tree()?;

        fn collect_pages(
            repo: &Repository,
            tree: &git2::Tree,
            base_path: &str,
            pages: &mut Vec<String>,
        ) -> Result<()> {
            for entry in tree.iter() {
                let name = entry.name().unwrap_or("");
                let path = if base_path.is_empty() {
                    name.to_string()
                } else {
                    format!("{}/{}", base_path, name)
                };

                match entry.kind() {
                    Some(ObjectType::Blob) => {
                        if let Some(page) = path.strip_suffix(PAGE_EXTENSION) {
                            pages.push(page.to_string());
                        }
                    }
                    Some(ObjectType::Tree) => {
                        let subtree = entry.to_object(repo)?.peel_to_tree()?;
                        collect_pages(repo, &subtree, &path, pages)?;
                    }
                    _ => {}
                }
            }
            Ok(())
        }

        let mut pages = Vec::new();
        collect_pages(&repo, &tree, "", &mut pages)?;
        pages.sort_by_key(|p| p.to_lowercase());

        Ok(pages)
    }
}

/// Repository-relative file path of a page name.
pub fn page_file(page: &str) -> String {
    format!("{}{}", page, PAGE_EXTENSION)
}
