use std::io::Write;

use async_trait::async_trait;
use labadmin_console::Confirmer;

/// Asks on stderr and reads the answer from stdin.
pub struct StdinConfirm;

#[async_trait]
impl Confirmer for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || {
            eprint!("{prompt} [y/N] ");
            let _ = std::io::stderr().flush();
            let mut answer = String::new();
            if std::io::stdin().read_line(&mut answer).is_err() {
                return false;
            }
            matches!(answer.trim(), "y" | "Y" | "yes")
        })
        .await
        .unwrap_or(false)
    }
}
