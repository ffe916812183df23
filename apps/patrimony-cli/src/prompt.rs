//! 终端交互：读取一行输入、删除确认。

use async_trait::async_trait;
use patrimony_view::Confirmer;
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

pub async fn read_line(prompt: &str) -> io::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// 在终端询问 y/N。
pub struct StdinConfirmer;

#[async_trait]
impl Confirmer for StdinConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        match read_line(&format!("{prompt} [y/N] ")).await {
            Ok(answer) => is_yes(&answer),
            Err(err) => {
                warn!(error = %err, "could not read confirmation");
                false
            }
        }
    }
}

/// `--yes`
pub struct AssumeYes;

#[async_trait]
impl Confirmer for AssumeYes {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y"));
        assert!(is_yes(" Sim "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }
}
