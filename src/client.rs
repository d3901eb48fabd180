use {
    crate::basis::{AstralEntity, Color, Direction, EntityError, Kind, Placement, Pos},
    anyhow::Result,
    log::{error, info, warn},
    serde_json::{json, Value},
    std::{fmt, time::Duration},
};

#[cfg(test)]
pub(crate) mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// `Reply` は HTTP レスポンスのステータスコードと本文を表す.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

/// `Transport` は一回の HTTP リクエストを送る手段を表す.
pub trait Transport {
    fn send(&self, method: Method, url: &str, body: &Value) -> Result<Reply>;
}

#[cfg(feature = "net")]
pub use http::HttpTransport;

#[cfg(feature = "net")]
mod http {
    use {
        super::{Method, Reply, Transport},
        anyhow::{Context as _, Result},
        serde_json::Value,
        std::time::Duration,
    };

    pub struct HttpTransport {
        client: reqwest::blocking::Client,
    }

    impl HttpTransport {
        pub fn new(timeout: Duration) -> Result<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .context("failed to build reqwest client")?;
            Ok(Self { client })
        }
    }

    impl Transport for HttpTransport {
        fn send(&self, method: Method, url: &str, body: &Value) -> Result<Reply> {
            let method = match method {
                Method::Post => reqwest::Method::POST,
                Method::Delete => reqwest::Method::DELETE,
            };

            let res = self
                .client
                .request(method, url)
                .json(body)
                .send()
                .with_context(|| format!("failed to send request to {}", url))?;

            let status = res.status().as_u16();
            let body = res.text().context("failed to decode body")?;

            Ok(Reply { status, body })
        }
    }
}

/// `RetryPolicy` はレート制限されたリクエストの再送方針を表す.
///
/// `n` 回目の再送の前には `backoff_base * 2^(n-1)` だけ待つ. 一回の呼び出しで送るリクエストは最大 `1 + max_retries` 回.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base: Duration,
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff_base: Duration::from_secs(1),
            retry_statuses: vec![429],
        }
    }
}

impl RetryPolicy {
    pub fn is_retryable(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// `retry` は 1 始まり.
    pub fn delay(&self, retry: u32) -> Duration {
        let exp = retry.saturating_sub(1).min(31);
        self.backoff_base.saturating_mul(1 << exp)
    }
}

/// `Outcome` は一回の配置・削除の結果を表す. 失敗してもログに残すだけで呼び出し元には伝播しない.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Failed { status: Option<u16>, body: String },
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done)
    }
}

pub struct MegaverseClient<T> {
    transport: T,
    base_url: String,
    candidate_id: String,
    policy: RetryPolicy,
    sleep: Box<dyn Fn(Duration)>,
}

impl<T: Transport> MegaverseClient<T> {
    pub fn new(
        transport: T,
        base_url: impl Into<String>,
        candidate_id: impl Into<String>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            candidate_id: candidate_id.into(),
            policy,
            sleep: Box::new(std::thread::sleep),
        }
    }

    /// 再送前の待機を差し替える.
    pub fn with_sleep(mut self, sleep: impl Fn(Duration) + 'static) -> Self {
        self.sleep = Box::new(sleep);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn place(&self, placement: &Placement) -> Outcome {
        let mut body = self.base_body(placement.pos);
        match placement.entity {
            AstralEntity::Polyanet => {}
            AstralEntity::Soloon { color } => body["color"] = json!(color),
            AstralEntity::Cometh { direction } => body["direction"] = json!(direction),
        }

        let outcome = self.execute(Method::Post, placement.entity.kind(), &body);
        if outcome.is_done() {
            info!("placed {:?} at {:?}", placement.entity, placement.pos);
        }
        outcome
    }

    /// 型のついていない入力から天体を組み立てて置く. 組み合わせが不正ならリクエストを送らずにエラーを返す.
    pub fn place_parts(
        &self,
        kind: Kind,
        pos: Pos,
        color: Option<Color>,
        direction: Option<Direction>,
    ) -> Result<Outcome, EntityError> {
        let entity = AstralEntity::from_parts(kind, color, direction)?;
        Ok(self.place(&Placement { pos, entity }))
    }

    pub fn remove(&self, kind: Kind, pos: Pos) -> Outcome {
        let body = self.base_body(pos);

        let outcome = self.execute(Method::Delete, kind, &body);
        if outcome.is_done() {
            info!("removed {:?} at {:?}", kind, pos);
        }
        outcome
    }

    fn base_body(&self, pos: Pos) -> Value {
        json!({
            "candidateId": self.candidate_id,
            "row": pos.row(),
            "column": pos.column(),
        })
    }

    fn execute(&self, method: Method, kind: Kind, body: &Value) -> Outcome {
        let url = format!("{}/{}", self.base_url, kind.path());
        let mut retry = 0;

        loop {
            let reply = match self.transport.send(method, &url, body) {
                Ok(reply) => reply,
                Err(e) => {
                    error!("{} request for '/{}' failed: {:#}", method, kind.path(), e);
                    return Outcome::Failed {
                        status: None,
                        body: format!("{:#}", e),
                    };
                }
            };

            if reply.status == 200 {
                return Outcome::Done;
            }

            if self.policy.is_retryable(reply.status) && retry < self.policy.max_retries {
                retry += 1;
                let delay = self.policy.delay(retry);
                warn!(
                    "{} '/{}' returned {}, retry {}/{} after {}ms",
                    method,
                    kind.path(),
                    reply.status,
                    retry,
                    self.policy.max_retries,
                    delay.as_millis()
                );
                (self.sleep)(delay);
                continue;
            }

            error!(
                "{} request for '/{}' failed: {}",
                method,
                kind.path(),
                reply.body
            );
            return Outcome::Failed {
                status: Some(reply.status),
                body: reply.body,
            };
        }
    }
}
