use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

/// An HTTP session shared by every download.
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    retries: usize,
}

impl Session {
    pub fn new() -> Self {
        Self {
            client: CLIENT.clone(),
            retries: 2,
        }
    }

    /// Creates a session on top of a custom client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client, retries: 2 }
    }

    /// Sets how many times a failed request is immediately retried.
    pub fn retries(self, retries: usize) -> Self {
        Self { retries, ..self }
    }

    pub(crate) async fn get(&self, url: &str) -> Result<reqwest::Response, reqwest::Error> {
        retry(self.retries, async || {
            self.client.get(url).send().await?.error_for_status()
        })
        .await
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::ClientBuilder::new()
        .timeout(Duration::from_secs(3))
        .build()
        .expect("Build reqwest client")
});

async fn retry<T, E, F>(mut retries: usize, f: impl Fn() -> F) -> Result<T, E>
where
    E: fmt::Display,
    F: Future<Output = Result<T, E>>,
{
    loop {
        let result = f().await;

        match result {
            Ok(response) => {
                break Ok(response);
            }
            Err(error) => {
                if retries > 0 {
                    log::warn!(
                        "{error} ({retries} {} left)",
                        if retries == 1 { "retry" } else { "retries" }
                    );
                    retries -= 1;
                } else {
                    break Err(error);
                }
            }
        }
    }
}
