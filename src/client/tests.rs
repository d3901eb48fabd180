use {
    super::{MegaverseClient, Method, Outcome, Reply, RetryPolicy, Transport},
    crate::{
        basis::{AstralEntity, Color, Direction, EntityError, Kind, Placement},
        grid::Grid,
    },
    anyhow::{bail, Result},
    serde_json::{json, Value},
    std::{cell::RefCell, collections::VecDeque, rc::Rc, time::Duration},
};

/// Replies with the scripted statuses in order, then 200 forever.
#[derive(Default)]
pub(crate) struct Scripted {
    statuses: RefCell<VecDeque<u16>>,
    pub(crate) requests: RefCell<Vec<(Method, String, Value)>>,
}

impl Scripted {
    pub(crate) fn new(statuses: &[u16]) -> Self {
        Self {
            statuses: RefCell::new(statuses.iter().copied().collect()),
            requests: RefCell::default(),
        }
    }
}

impl Transport for Scripted {
    fn send(&self, method: Method, url: &str, body: &Value) -> Result<Reply> {
        self.requests
            .borrow_mut()
            .push((method, url.to_owned(), body.clone()));
        let status = self.statuses.borrow_mut().pop_front().unwrap_or(200);
        Ok(Reply {
            status,
            body: format!("status {}", status),
        })
    }
}

struct Unreachable;

impl Transport for Unreachable {
    fn send(&self, _: Method, url: &str, _: &Value) -> Result<Reply> {
        bail!("connection refused: {}", url)
    }
}

fn client<T: Transport>(transport: T) -> (MegaverseClient<T>, Rc<RefCell<Vec<Duration>>>) {
    let slept = Rc::new(RefCell::new(vec![]));
    let recorder = Rc::clone(&slept);
    let client = MegaverseClient::new(
        transport,
        "https://example.test/api/",
        "candidate",
        RetryPolicy {
            backoff_base: Duration::from_millis(10),
            ..RetryPolicy::default()
        },
    )
    .with_sleep(move |d| recorder.borrow_mut().push(d));
    (client, slept)
}

#[test]
fn delay_doubles() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.delay(1), Duration::from_secs(1));
    assert_eq!(policy.delay(2), Duration::from_secs(2));
    assert_eq!(policy.delay(5), Duration::from_secs(16));
    assert!(policy.is_retryable(429));
    assert!(!policy.is_retryable(500));
}

#[test]
fn polyanet_body() {
    let grid = Grid::square(10);
    let (client, _) = client(Scripted::default());
    let outcome = client.place(&Placement::polyanet(grid.pos(2, 7).unwrap()));
    assert_eq!(outcome, Outcome::Done);

    let requests = client.transport().requests.borrow();
    assert_eq!(requests.len(), 1);
    let (method, url, body) = &requests[0];
    assert_eq!(*method, Method::Post);
    assert_eq!(url, "https://example.test/api/polyanets");
    assert_eq!(
        body,
        &json!({"candidateId": "candidate", "row": 2, "column": 7})
    );
}

#[test]
fn attribute_bodies() {
    let grid = Grid::square(10);
    let (client, _) = client(Scripted::default());
    client.place(&Placement {
        pos: grid.pos(1, 1).unwrap(),
        entity: AstralEntity::Soloon {
            color: Color::Purple,
        },
    });
    client.place(&Placement {
        pos: grid.pos(3, 4).unwrap(),
        entity: AstralEntity::Cometh {
            direction: Direction::Left,
        },
    });

    let requests = client.transport().requests.borrow();
    assert_eq!(requests[0].1, "https://example.test/api/soloons");
    assert_eq!(
        requests[0].2,
        json!({"candidateId": "candidate", "row": 1, "column": 1, "color": "purple"})
    );
    assert_eq!(requests[1].1, "https://example.test/api/comeths");
    assert_eq!(
        requests[1].2,
        json!({"candidateId": "candidate", "row": 3, "column": 4, "direction": "left"})
    );
}

#[test]
fn remove_sends_delete() {
    let grid = Grid::square(10);
    let (client, _) = client(Scripted::default());
    assert!(client.remove(Kind::Soloon, grid.pos(5, 6).unwrap()).is_done());

    let requests = client.transport().requests.borrow();
    let (method, url, body) = &requests[0];
    assert_eq!(*method, Method::Delete);
    assert_eq!(url, "https://example.test/api/soloons");
    assert_eq!(
        body,
        &json!({"candidateId": "candidate", "row": 5, "column": 6})
    );
}

#[test]
fn retries_rate_limit() {
    let grid = Grid::square(10);
    let (client, slept) = client(Scripted::new(&[429, 429, 200]));
    let outcome = client.place(&Placement::polyanet(grid.pos(0, 0).unwrap()));

    assert_eq!(outcome, Outcome::Done);
    assert_eq!(client.transport().requests.borrow().len(), 3);
    assert_eq!(
        *slept.borrow(),
        vec![Duration::from_millis(10), Duration::from_millis(20)]
    );
}

#[test]
fn gives_up_after_max_retries() {
    let grid = Grid::square(10);
    let (client, slept) = client(Scripted::new(&[429; 10]));
    let outcome = client.place(&Placement::polyanet(grid.pos(0, 0).unwrap()));

    assert_eq!(
        outcome,
        Outcome::Failed {
            status: Some(429),
            body: "status 429".into(),
        }
    );
    assert_eq!(client.transport().requests.borrow().len(), 6);
    assert_eq!(slept.borrow().len(), 5);
    assert_eq!(slept.borrow()[4], Duration::from_millis(160));
}

#[test]
fn server_error_is_not_retried() {
    let grid = Grid::square(10);
    let (client, slept) = client(Scripted::new(&[500]));
    let outcome = client.place(&Placement::polyanet(grid.pos(0, 0).unwrap()));

    assert_eq!(
        outcome,
        Outcome::Failed {
            status: Some(500),
            body: "status 500".into(),
        }
    );
    assert_eq!(client.transport().requests.borrow().len(), 1);
    assert!(slept.borrow().is_empty());
}

#[test]
fn transport_error_is_swallowed() {
    let grid = Grid::square(10);
    let (client, _) = client(Unreachable);
    match client.remove(Kind::Polyanet, grid.pos(0, 0).unwrap()) {
        Outcome::Failed { status: None, body } => assert!(body.contains("connection refused")),
        o => panic!("unexpected outcome: {:?}", o),
    }
}

#[test]
fn invalid_entity_never_reaches_transport() {
    let grid = Grid::square(10);
    let (client, _) = client(Scripted::default());
    let pos = grid.pos(4, 4).unwrap();

    assert_eq!(
        client.place_parts(Kind::Soloon, pos, None, None),
        Err(EntityError::MissingColor)
    );
    assert_eq!(
        client.place_parts(Kind::Polyanet, pos, Some(Color::Red), None),
        Err(EntityError::UnexpectedColor(Kind::Polyanet))
    );
    assert!(client.transport().requests.borrow().is_empty());

    assert_eq!(
        client.place_parts(Kind::Cometh, pos, None, Some(Direction::Up)),
        Ok(Outcome::Done)
    );
    assert_eq!(client.transport().requests.borrow().len(), 1);
}
