//! The ureq transport and command loop against the live mock server.

use std::net::SocketAddr;

use drink_app::{dispatch, Command, Outcome, TerminalRenderer, UreqTransport};
use drink_core::{ApiError, DrinkClient, DrinkId, DrinkViewModel, HttpMethod, HttpRequest, Transport};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn run(vm: &mut DrinkViewModel<UreqTransport, TerminalRenderer<Vec<u8>>>, line: &str) -> Outcome {
    dispatch(vm, line.parse::<Command>().unwrap()).unwrap()
}

#[test]
fn transport_returns_error_statuses_as_data() {
    let addr = start_server();
    let transport = UreqTransport::new();

    let response = transport
        .execute(HttpRequest {
            method: HttpMethod::Get,
            path: format!("http://{addr}/api/drink/12"),
            headers: Vec::new(),
            body: None,
        })
        .unwrap();

    assert_eq!(response.status, 404);
    assert!(response.body.is_empty());
}

#[test]
fn transport_reports_refused_connections() {
    let dead = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = dead.local_addr().unwrap();
    drop(dead);

    let err = DrinkClient::new(&format!("http://{addr}"))
        .list(&UreqTransport::new())
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn command_session() {
    let addr = start_server();
    let mut vm = DrinkViewModel::new(
        DrinkClient::new(&format!("http://{addr}/")),
        UreqTransport::new(),
        TerminalRenderer::new(Vec::new()),
    );
    vm.start().unwrap();

    run(&mut vm, "set name Mojito");
    run(&mut vm, r#"set ingredients ["rum", "mint"]"#);
    run(&mut vm, "add");
    run(&mut vm, "set name Negroni");
    run(&mut vm, "add");
    run(&mut vm, "edit 1 name Daiquiri");

    let names: Vec<_> = vm
        .state()
        .drink_list()
        .unwrap()
        .iter()
        .map(|d| d.name().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Daiquiri", "Negroni"]);

    assert_eq!(
        run(&mut vm, "show 2"),
        Outcome::Continue(Some("#2 Negroni".to_string()))
    );

    run(&mut vm, "rm 1");
    let ids: Vec<_> = vm.state().drink_list().unwrap().iter().map(|d| d.id.clone()).collect();
    assert_eq!(ids, vec![DrinkId::Int(2)]);
    assert_eq!(run(&mut vm, "quit"), Outcome::Quit);
}
