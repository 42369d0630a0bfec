// Integration tests for uservault
// HTTP behaviour runs against a local mockito server.

use mockito::{Matcher, Server};

use uservault::api::{HttpGateway, UserGateway};
use uservault::controller::Controller;
use uservault::{AppError, UserFields};

fn sample_fields() -> UserFields {
    UserFields {
        name: "John Doe".into(),
        father_name: "Richard Doe".into(),
        cnic: "35202-1234567-1".into(),
        phone: "0300-1234567".into(),
        address: "X".into(),
        degree: "BSCS".into(),
        semester: "5".into(),
        university: "NU".into(),
    }
}

const LIST_BODY: &str = r#"[
    {"_id":"665f1c2a","name":"John Doe","fatherName":"Richard Doe","cnic":"35202-1234567-1",
     "phone":"0300-1234567","address":"X","degree":"BSCS","semester":"5","university":"NU","__v":0}
]"#;

// 1) List maps the backend `_id` onto `id` and keeps camelCase fields
#[tokio::test]
async fn list_maps_wire_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/users/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LIST_BODY)
        .expect(1)
        .create_async()
        .await;

    let gw = HttpGateway::new(server.url());
    let users = gw.list_users().await.unwrap();

    mock.assert_async().await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, "665f1c2a");
    assert_eq!(users[0].fields.father_name, "Richard Doe");
}

// 2) Create posts the camelCase body and returns the stored record
#[tokio::test]
async fn create_posts_camel_case_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/users")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "fatherName": "Richard Doe",
            "cnic": "35202-1234567-1"
        })))
        .with_status(201)
        .with_body(r#"{"_id":"abc","name":"John Doe"}"#)
        .expect(1)
        .create_async()
        .await;

    let user = HttpGateway::new(server.url())
        .create_user(&sample_fields())
        .await
        .unwrap()
        .expect("record echoed");

    mock.assert_async().await;
    assert_eq!(user.id, "abc");
    assert_eq!(user.fields.name, "John Doe");
}

// 3) Delete: 204, empty body, and explicit success flags
#[tokio::test]
async fn delete_acknowledgements() {
    let mut server = Server::new_async().await;
    let _no_content = server.mock("DELETE", "/api/users/a").with_status(204).create_async().await;
    let _empty = server.mock("DELETE", "/api/users/b").with_status(200).with_body("").create_async().await;
    let _refused = server
        .mock("DELETE", "/api/users/c")
        .with_status(200)
        .with_body(r#"{"success":false}"#)
        .create_async()
        .await;

    let gw = HttpGateway::new(server.url());
    assert!(gw.delete_user("a").await.unwrap());
    assert!(gw.delete_user("b").await.unwrap());
    assert!(!gw.delete_user("c").await.unwrap());
}

// 4) Error payload message is carried on the error with its status
#[tokio::test]
async fn error_body_message_is_surfaced() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("PUT", "/api/users/x1")
        .with_status(409)
        .with_body(r#"{"message":"CNIC already registered"}"#)
        .create_async()
        .await;

    let err = HttpGateway::new(server.url())
        .update_user("x1", &sample_fields())
        .await
        .unwrap_err();

    match &err {
        AppError::Http { status, message, data } => {
            assert_eq!(*status, 409);
            assert_eq!(message, "CNIC already registered");
            assert!(data.is_some());
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

// 5) Missing record is a 404 with the reason phrase when the body isn't JSON
#[tokio::test]
async fn missing_user_is_not_found() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/users/nope")
        .with_status(404)
        .with_body("Cannot GET /api/users/nope")
        .create_async()
        .await;

    let err = HttpGateway::new(server.url()).get_user("nope").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Not Found");
}

// 6) Controller submit end to end: exactly one POST, then exactly one list refresh
#[tokio::test]
async fn controller_submit_round_trip() {
    let mut server = Server::new_async().await;
    let post = server
        .mock("POST", "/api/users")
        .with_status(201)
        .with_body(r#"{"_id":"665f1c2a","name":"John Doe"}"#)
        .expect(1)
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/users/")
        .with_status(200)
        .with_body(LIST_BODY)
        .expect(1)
        .create_async()
        .await;

    let mut controller = Controller::new(Box::new(HttpGateway::new(server.url())));
    assert!(controller.submit(&sample_fields(), None).await);

    post.assert_async().await;
    list.assert_async().await;
    assert_eq!(controller.users().len(), 1);
    assert!(!controller.is_loading());
}

// 7) Saves acknowledged without a record still count: 204 on create, {message} on update
#[tokio::test]
async fn controller_submit_accepts_bare_acknowledgements() {
    let mut server = Server::new_async().await;
    let post = server.mock("POST", "/api/users").with_status(204).expect(2).create_async().await;
    let put = server
        .mock("PUT", "/api/users/665f1c2a")
        .with_status(200)
        .with_body(r#"{"message":"User updated successfully"}"#)
        .expect(1)
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/users/")
        .with_status(200)
        .with_body(LIST_BODY)
        .expect(2)
        .create_async()
        .await;

    let gw = HttpGateway::new(server.url());
    assert!(gw.create_user(&sample_fields()).await.unwrap().is_none());

    let mut controller = Controller::new(Box::new(gw));
    assert!(controller.submit(&sample_fields(), None).await);
    assert_eq!(controller.notices.last().unwrap().message, "User data submitted successfully!");
    assert!(controller.submit(&sample_fields(), Some("665f1c2a")).await);
    assert_eq!(controller.notices.last().unwrap().message, "User details updated successfully!");

    post.assert_async().await;
    put.assert_async().await;
    list.assert_async().await;
    assert_eq!(controller.users().len(), 1);
}

// 8) Unreachable backend is a network error, and the controller keeps its list
#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let gw = HttpGateway::new(format!("http://127.0.0.1:{port}"));
    let err = gw.list_users().await.unwrap_err();
    assert!(matches!(err, AppError::Network(_)), "got {err:?}");

    let mut controller = Controller::new(Box::new(gw));
    controller.refresh().await;
    assert!(controller.users().is_empty());
    assert!(!controller.is_loading());
    assert!(controller.notices.last().is_some());
}

// 9) Theme config roundtrip and init
#[test]
fn theme_roundtrip_and_init() {
    use uservault::app::Theme;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("theme.conf");

    let t = Theme::slate();
    t.write_file(&path).expect("write theme");
    let t2 = Theme::from_file(&path).expect("read theme");
    assert_eq!(format!("{:?}", t.text), format!("{:?}", t2.text));
    assert_eq!(format!("{:?}", t.header_bg), format!("{:?}", t2.header_bg));

    let fresh = dir.path().join("nested").join("theme.conf");
    let _ = Theme::load_or_init(&fresh);
    assert!(fresh.exists());
}

// 10) Keybinds config roundtrip and init
#[test]
fn keymap_roundtrip_and_init() {
    use uservault::app::keymap::{KeyAction, Keymap};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keybinds.conf");

    let km = Keymap::load_or_init(&path);
    assert!(path.exists());
    let reread = Keymap::from_file(&path).expect("read keymap");
    assert_eq!(km.keys_for(KeyAction::DeleteSelection), reread.keys_for(KeyAction::DeleteSelection));
    assert_eq!(reread.keys_for(KeyAction::ExportPdf), vec!["p".to_string()]);
}
