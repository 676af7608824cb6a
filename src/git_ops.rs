use anyhow::{Context, Result};
use git2::{Repository, Signature, Time};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Commits the data file to the git repository that contains it
pub struct GitSync {
    repo: Option<Mutex<Repository>>,
}

impl GitSync {
    /// Discover the repository enclosing `file_path`, if there is one
    pub fn new(file_path: &Path) -> Self {
        let dir = Self::containing_dir(file_path);
        let repo = Repository::discover(&dir).ok().map(Mutex::new);
        Self { repo }
    }

    /// Check if the data file lives inside a git repository
    pub fn is_git_managed(&self) -> bool {
        self.repo.is_some()
    }

    fn containing_dir(file_path: &Path) -> PathBuf {
        match file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Stage `file_path` and commit it with `message`
    ///
    /// Nothing is committed when the staged tree equals the HEAD tree.
    pub fn commit(&self, file_path: &Path, message: &str) -> Result<()> {
        let Some(repo) = &self.repo else {
            return Ok(());
        };
        let repo = repo.lock().unwrap_or_else(|e| e.into_inner());

        let workdir = repo
            .workdir()
            .context("Repository has no working directory")?;
        let absolute = file_path
            .canonicalize()
            .context("Data file does not exist")?;
        let workdir = workdir
            .canonicalize()
            .context("Cannot resolve repository working directory")?;
        let relative = absolute
            .strip_prefix(&workdir)
            .context("Data file is not inside the repository")?;

        let mut index = repo.index()?;
        index.add_path(relative)?;
        index.write()?;
        let tree = repo.find_tree(index.write_tree()?)?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        if let Some(parent) = &parent
            && parent.tree_id() == tree.id()
        {
            return Ok(());
        }

        let signature = Self::signature(&repo)?;
        let parents: Vec<_> = parent.iter().collect();
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        tracing::debug!(commit_message = message, "committed data file");
        Ok(())
    }

    /// Push the current branch to `origin`
    pub fn push(&self) -> Result<()> {
        let Some(repo) = &self.repo else {
            return Ok(());
        };
        let repo = repo.lock().unwrap_or_else(|e| e.into_inner());

        let head = repo.head().context("Failed to get HEAD")?;
        let branch = head.shorthand().context("Failed to get branch name")?;
        let mut remote = repo
            .find_remote("origin")
            .context("Failed to find remote 'origin'")?;

        let refspec = format!("refs/heads/{}", branch);
        remote
            .push(&[&refspec], None)
            .context("Failed to push to origin")?;
        Ok(())
    }

    fn signature(repo: &Repository) -> Result<Signature<'static>> {
        let config = repo.config()?;
        let name = config
            .get_string("user.name")
            .unwrap_or_else(|_| "todo-mcp".to_string());
        let email = config
            .get_string("user.email")
            .unwrap_or_else(|_| "todo-mcp@localhost".to_string());

        match Signature::now(&name, &email) {
            Ok(sig) => Ok(sig),
            // Some CI sandboxes have no usable clock
            Err(_) => Signature::new(&name, &email, &Time::new(1_700_000_000, 0))
                .context("Failed to create signature"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // テスト用のgitリポジトリを初期化
    fn setup_test_repo() -> (TempDir, Repository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();

        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        (temp_dir, repo)
    }

    // git管理外のディレクトリ
    #[test]
    fn test_non_git_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("todo.toml");

        let git = GitSync::new(&file_path);
        assert!(!git.is_git_managed());
        fs::write(&file_path, "x").unwrap();
        assert!(git.commit(&file_path, "noop").is_ok());
        assert!(git.push().is_ok());
    }

    // 初回コミットと、変更なしの場合のスキップ
    #[test]
    fn test_commit_then_skip_unchanged() {
        let (temp_dir, repo) = setup_test_repo();
        let file_path = temp_dir.path().join("todo.toml");
        fs::write(&file_path, "darkMode = \"false\"\n").unwrap();

        let git = GitSync::new(&file_path);
        assert!(git.is_git_managed());
        git.commit(&file_path, "Add task 4").unwrap();

        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.message().unwrap(), "Add task 4");

        git.commit(&file_path, "Nothing changed").unwrap();
        let head_again = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.id(), head_again.id());

        fs::write(&file_path, "darkMode = \"true\"\n").unwrap();
        git.commit(&file_path, "Toggle theme").unwrap();
        let latest = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(latest.message().unwrap(), "Toggle theme");
        assert_eq!(latest.parent_id(0).unwrap(), head.id());
    }
}
