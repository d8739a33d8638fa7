//! Page controller tests against a mock tennis records API.

use std::sync::Arc;

use courtside_client::{
    ApiClient, AuthStatus, ClientConfig, MemorySessionStore, Session, SessionKey, SessionStore,
};
use courtside_types::{PlayerId, TeamId, UserId};
use courtside_web::pages::{
    CreatePlayerPage, CreateTeamPage, DeleteOutcome, EditPlayerPage, EditTeamPage, LoginForm,
    LoginPage, PlayerForm, PlayersPage, RegisterForm, RegisterPage, TeamForm, TeamsPage,
};
use courtside_web::{Link, NavItem, Navigation, Outcome, PageContext};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_ID: &str = "6f1c1f0e-2a7c-4d7e-9d1e-3a5b8c0f4e21";
const P1: &str = "5a8e2f1c-3b7d-4e9a-8c6f-0d1e2f3a4b5c";
const P2: &str = "7c9d1e2f-4a5b-4c6d-8e7f-9a0b1c2d3e4f";

struct Harness {
    server: MockServer,
    store: Arc<MemorySessionStore>,
    ctx: PageContext,
}

async fn harness(signed_in: bool) -> Harness {
    let server = MockServer::start().await;
    let store = Arc::new(MemorySessionStore::new());
    if signed_in {
        store
            .set_all(&Session {
                access_token: "token-1".into(),
                user_id: UserId::parse(USER_ID).unwrap(),
                username: "laurin".into(),
            })
            .unwrap();
    }
    let api = ApiClient::new(ClientConfig::new(server.uri()).unwrap(), store.clone()).unwrap();
    Harness {
        server,
        store,
        ctx: PageContext::new(api),
    }
}

fn auth_body(username: &str) -> serde_json::Value {
    json!({
        "accessToken": "token-2",
        "user": { "ID": USER_ID, "Username": username }
    })
}

fn players_body() -> serde_json::Value {
    json!([
        { "ID": P1, "FirstName": "Roger", "LastName": "Federer", "UserID": USER_ID },
        { "ID": P2, "FirstName": "Rafael", "LastName": "Nadal", "UserID": USER_ID }
    ])
}

async fn expect_no_requests(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

// =============================================================================
// Page Load
// =============================================================================

#[tokio::test]
async fn test_enter_renders_navbar_from_refresh() {
    let h = harness(true).await;
    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("laurin")))
        .expect(1)
        .mount(&h.server)
        .await;

    let frame = h.ctx.enter("/players").await;
    assert!(frame.status.is_authenticated());
    assert_eq!(
        frame.navbar.items(),
        [
            NavItem::Home,
            NavItem::Username("laurin".into()),
            NavItem::Logout
        ]
    );
    assert_eq!(h.store.get(SessionKey::AccessToken).as_deref(), Some("token-2"));
}

#[tokio::test]
async fn test_enter_with_expired_token_shows_login_links() {
    let h = harness(true).await;
    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "token is expired" })),
        )
        .mount(&h.server)
        .await;

    let frame = h.ctx.enter("/teams").await;
    assert_eq!(frame.status, AuthStatus::Anonymous);
    assert_eq!(frame.navbar.items(), [NavItem::Login, NavItem::Register]);
    assert!(h.store.session().is_none());
}

#[tokio::test]
async fn test_logout_clears_store_and_goes_home() {
    let h = harness(true).await;
    h.store
        .set_scratch(SessionKey::PlayerFirstName, "Roger")
        .unwrap();

    let nav = courtside_web::navbar::activate(&NavItem::Logout, h.ctx.auth());
    assert_eq!(nav, Some(Navigation::to("/")));
    for key in SessionKey::ALL {
        assert_eq!(h.store.get(key), None);
    }
}

// =============================================================================
// Login and Registration
// =============================================================================

#[tokio::test]
async fn test_login_wrong_password() {
    let h = harness(false).await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "usernameOrEmail": "laurin", "password": "nope" })))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "hashedPassword mismatch" })),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = LoginPage::new(&h.ctx)
        .submit(&LoginForm {
            username: "laurin".into(),
            password: "nope".into(),
        })
        .await;

    assert_eq!(outcome, Outcome::Error("Wrong Password"));
    assert!(h.store.session().is_none());
}

#[tokio::test]
async fn test_login_success_stores_session() {
    let h = harness(false).await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("laurin")))
        .mount(&h.server)
        .await;

    let outcome = LoginPage::new(&h.ctx)
        .submit(&LoginForm {
            username: "laurin@example.com".into(),
            password: "secret".into(),
        })
        .await;

    assert_eq!(outcome, Outcome::Navigate(Navigation::to("/")));
    let session = h.store.session().unwrap();
    assert_eq!(session.access_token, "token-2");
    assert_eq!(session.username, "laurin");
}

#[tokio::test]
async fn test_register_password_mismatch_makes_no_request() {
    let h = harness(false).await;
    expect_no_requests(&h.server).await;

    let outcome = RegisterPage::new(&h.ctx)
        .submit(&RegisterForm {
            username: "laurin".into(),
            email: "laurin@example.com".into(),
            password: "secret1".into(),
            confirm: "secret2".into(),
        })
        .await;

    assert_eq!(outcome, Outcome::Error("Wrong Password combination"));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let h = harness(false).await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "pq: duplicate key value violates unique constraint \"users_username_unique\""
        })))
        .mount(&h.server)
        .await;

    let outcome = RegisterPage::new(&h.ctx)
        .submit(&RegisterForm {
            username: "laurin".into(),
            email: "new@example.com".into(),
            password: "secret".into(),
            confirm: "secret".into(),
        })
        .await;

    assert_eq!(outcome, Outcome::Error("Username already exists"));
}

#[tokio::test]
async fn test_register_success_stores_session() {
    let h = harness(false).await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_body("newbie")))
        .mount(&h.server)
        .await;

    let outcome = RegisterPage::new(&h.ctx)
        .submit(&RegisterForm {
            username: "newbie".into(),
            email: "newbie@example.com".into(),
            password: "secret".into(),
            confirm: "secret".into(),
        })
        .await;

    assert_eq!(outcome, Outcome::Navigate(Navigation::to("/")));
    assert_eq!(h.store.get(SessionKey::Username).as_deref(), Some("newbie"));
}

// =============================================================================
// Players
// =============================================================================

#[tokio::test]
async fn test_create_player_success() {
    let h = harness(true).await;
    Mock::given(method("POST"))
        .and(path("/api/players"))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ID": P1, "FirstName": "Roger", "LastName": "Federer", "UserID": USER_ID
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = CreatePlayerPage::new(&h.ctx)
        .submit(&PlayerForm {
            first_name: "Roger".into(),
            last_name: "Federer".into(),
        })
        .await;

    assert_eq!(
        outcome,
        Outcome::Success {
            message: "Player was successfully created",
            link: Link::new("View all Players", "/players"),
        }
    );
}

#[tokio::test]
async fn test_create_player_ignores_created_body() {
    let h = harness(true).await;
    Mock::given(method("POST"))
        .and(path("/api/players"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = CreatePlayerPage::new(&h.ctx)
        .submit(&PlayerForm {
            first_name: "Roger".into(),
            last_name: "Federer".into(),
        })
        .await;

    assert!(matches!(
        outcome,
        Outcome::Success {
            message: "Player was successfully created",
            ..
        }
    ));
}

#[tokio::test]
async fn test_players_list() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/players/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(players_body()))
        .mount(&h.server)
        .await;

    let view = PlayersPage::new(&h.ctx).load().await;
    assert_eq!(view.create.href, "/create-player");
    assert_eq!(view.notice, None);
    let labels: Vec<_> = view.entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["Roger Federer", "Rafael Nadal"]);
    assert_eq!(view.entries[0].edit_href, format!("/edit-player/{P1}"));
}

#[tokio::test]
async fn test_players_list_empty_and_failed() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/players/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .up_to_n_times(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/players/{USER_ID}")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
        .mount(&h.server)
        .await;

    let page = PlayersPage::new(&h.ctx);
    assert_eq!(page.load().await.notice, Some("No players created yet"));
    assert_eq!(page.load().await.notice, Some("Couldn't fetch players"));
}

#[tokio::test]
async fn test_edit_player_roundtrip_through_scratch() {
    let h = harness(true).await;
    Mock::given(method("PUT"))
        .and(path("/api/players"))
        .and(body_json(json!({ "FirstName": "Roger", "LastName": "F.", "ID": P1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&h.server)
        .await;

    let player = courtside_types::Player {
        id: PlayerId::parse(P1).unwrap(),
        first_name: "Roger".into(),
        last_name: "Federer".into(),
        user_id: None,
    };
    let nav = PlayersPage::new(&h.ctx).edit(&player);
    let path = format!("/edit-player/{P1}");
    assert_eq!(nav, Outcome::Navigate(Navigation::to(path.clone())));

    let edit = EditPlayerPage::new(&h.ctx);
    let mut form = edit.prefill();
    assert_eq!(form.first_name, "Roger");
    assert_eq!(form.last_name, "Federer");

    form.last_name = "F.".into();
    let outcome = edit.submit(&path, &form).await;
    assert!(matches!(
        outcome,
        Outcome::Success {
            message: "Player was successfully updated",
            ..
        }
    ));
    assert_eq!(h.store.get(SessionKey::PlayerLastName).as_deref(), Some("F."));
}

#[tokio::test]
async fn test_edit_player_without_id_makes_no_request() {
    let h = harness(true).await;
    expect_no_requests(&h.server).await;

    let outcome = EditPlayerPage::new(&h.ctx)
        .submit("/edit-player/", &PlayerForm::default())
        .await;
    assert_eq!(outcome, Outcome::Error("Error with request"));
}

#[tokio::test]
async fn test_delete_player_rerenders_list() {
    let h = harness(true).await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/players/{P1}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/players/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ID": P2, "FirstName": "Rafael", "LastName": "Nadal", "UserID": USER_ID }
        ])))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = PlayersPage::new(&h.ctx)
        .delete(PlayerId::parse(P1).unwrap())
        .await;
    match outcome {
        DeleteOutcome::Deleted(view) => assert_eq!(view.entries.len(), 1),
        other => panic!("expected re-rendered list, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_player_failure_is_classified() {
    let h = harness(true).await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/players/{P1}")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "sql: no rows in result set"
        })))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/players/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(players_body()))
        .expect(0)
        .mount(&h.server)
        .await;

    let outcome = PlayersPage::new(&h.ctx)
        .delete(PlayerId::parse(P1).unwrap())
        .await;
    assert_eq!(outcome, DeleteOutcome::Failed("Wrong Username"));
}

// =============================================================================
// Teams
// =============================================================================

#[tokio::test]
async fn test_create_team_same_player_makes_no_request() {
    let h = harness(true).await;
    expect_no_requests(&h.server).await;

    let outcome = CreateTeamPage::new(&h.ctx)
        .submit(&TeamForm {
            player_one: P1.into(),
            player_two: P1.into(),
            name: "Solo".into(),
        })
        .await;

    assert_eq!(outcome, Outcome::Error("Please enter two different Players"));
}

#[tokio::test]
async fn test_create_team_missing_player_makes_no_request() {
    let h = harness(true).await;
    expect_no_requests(&h.server).await;

    let outcome = CreateTeamPage::new(&h.ctx)
        .submit(&TeamForm {
            player_one: P1.into(),
            player_two: String::new(),
            name: String::new(),
        })
        .await;

    assert_eq!(outcome, Outcome::Error("Please enter two Players"));
}

#[tokio::test]
async fn test_create_team_success() {
    let h = harness(true).await;
    let team_id = Uuid::new_v4().to_string();
    Mock::given(method("POST"))
        .and(path("/api/teams"))
        .and(body_json(json!({
            "PlayerOne": P1, "PlayerTwo": P2, "Name": "Fedal", "UserID": USER_ID
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ID": team_id, "Name": "Fedal", "PlayerOne": P1, "PlayerTwo": P2, "UserID": USER_ID
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = CreateTeamPage::new(&h.ctx)
        .submit(&TeamForm {
            player_one: P1.into(),
            player_two: P2.into(),
            name: "Fedal".into(),
        })
        .await;

    assert_eq!(
        outcome,
        Outcome::Success {
            message: "Team was successfully created",
            link: Link::new("View all Teams", "/teams"),
        }
    );
}

#[tokio::test]
async fn test_create_team_ignores_empty_created_body() {
    let h = harness(true).await;
    Mock::given(method("POST"))
        .and(path("/api/teams"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = CreateTeamPage::new(&h.ctx)
        .submit(&TeamForm {
            player_one: P1.into(),
            player_two: P2.into(),
            name: String::new(),
        })
        .await;

    assert!(matches!(
        outcome,
        Outcome::Success {
            message: "Team was successfully created",
            ..
        }
    ));
}

#[tokio::test]
async fn test_player_options() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/players/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(players_body()))
        .mount(&h.server)
        .await;

    let options = CreateTeamPage::new(&h.ctx).player_options().await;
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, ["Roger Federer", "Rafael Nadal"]);
    assert_eq!(options[1].value.to_string(), P2);
}

#[tokio::test]
async fn test_teams_list_skips_singles() {
    let h = harness(true).await;
    let doubles_id = Uuid::new_v4().to_string();
    Mock::given(method("GET"))
        .and(path(format!("/api/teams/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ID": Uuid::new_v4().to_string(), "Name": "", "PlayerOne": P1, "PlayerTwo": null },
            { "ID": doubles_id, "Name": "", "PlayerOne": P1, "PlayerTwo": P2 }
        ])))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/players/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(players_body()))
        .expect(1)
        .mount(&h.server)
        .await;

    let view = TeamsPage::new(&h.ctx).load().await;
    assert_eq!(view.create.href, "/create-team");
    assert_eq!(view.entries.len(), 1);
    assert_eq!(
        view.entries[0].label,
        r#"Team Name: "[No Team name]" Player One: "Roger Federer" Player Two: "Rafael Nadal""#
    );
    assert_eq!(view.entries[0].edit_href, format!("/edit-team/{doubles_id}"));
}

#[tokio::test]
async fn test_teams_list_only_singles_is_empty() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/teams/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ID": Uuid::new_v4().to_string(), "Name": "", "PlayerOne": P1, "PlayerTwo": null }
        ])))
        .mount(&h.server)
        .await;

    let view = TeamsPage::new(&h.ctx).load().await;
    assert!(view.entries.is_empty());
    assert_eq!(view.notice, Some("No teams created yet"));
}

#[tokio::test]
async fn test_teams_list_failure() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/teams/{USER_ID}")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
        .mount(&h.server)
        .await;

    let view = TeamsPage::new(&h.ctx).load().await;
    assert_eq!(view.notice, Some("Couldn't fetch teams"));
}

#[tokio::test]
async fn test_edit_team_prefill_and_submit() {
    let h = harness(true).await;
    let team_id = TeamId(Uuid::new_v4());
    Mock::given(method("PUT"))
        .and(path("/api/teams"))
        .and(body_json(json!({
            "ID": team_id.to_string(), "Name": "Renamed", "PlayerOne": P2, "PlayerTwo": P1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&h.server)
        .await;

    let team = courtside_types::Team {
        id: team_id,
        name: String::new(),
        player_one: PlayerId::parse(P1).unwrap(),
        player_two: Some(PlayerId::parse(P2).unwrap()),
        user_id: None,
    };
    let nav = TeamsPage::new(&h.ctx).edit(&team);
    let path = format!("/edit-team/{team_id}");
    assert_eq!(nav, Outcome::Navigate(Navigation::to(path.clone())));

    let edit = EditTeamPage::new(&h.ctx);
    let form = edit.prefill();
    assert_eq!(form.player_one, P1);
    assert_eq!(form.player_two, P2);

    let swapped = TeamForm {
        player_one: form.player_two,
        player_two: form.player_one,
        name: "Renamed".into(),
    };
    let outcome = edit.submit(&path, &swapped).await;
    assert!(matches!(
        outcome,
        Outcome::Success {
            message: "Team was successfully updated",
            ..
        }
    ));
    assert_eq!(h.store.get(SessionKey::TeamPlayerOne).as_deref(), Some(P2));
}

#[tokio::test]
async fn test_delete_team_failure_is_classified() {
    let h = harness(true).await;
    let team_id = TeamId(Uuid::new_v4());
    Mock::given(method("DELETE"))
        .and(path(format!("/api/teams/{team_id}")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = TeamsPage::new(&h.ctx).delete(team_id).await;
    assert_eq!(outcome, DeleteOutcome::Failed("Error with request"));
}

#[tokio::test]
async fn test_delete_team_rerenders_list() {
    let h = harness(true).await;
    let deleted = TeamId(Uuid::new_v4());
    let remaining = Uuid::new_v4().to_string();
    Mock::given(method("DELETE"))
        .and(path(format!("/api/teams/{deleted}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/teams/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ID": remaining, "Name": "Fedal", "PlayerOne": P1, "PlayerTwo": P2 }
        ])))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/players/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(players_body()))
        .mount(&h.server)
        .await;

    match TeamsPage::new(&h.ctx).delete(deleted).await {
        DeleteOutcome::Deleted(view) => {
            assert_eq!(view.entries.len(), 1);
            assert_eq!(view.entries[0].team.id.to_string(), remaining);
            assert_eq!(
                view.entries[0].label,
                r#"Team Name: "Fedal" Player One: "Roger Federer" Player Two: "Rafael Nadal""#
            );
        }
        other => panic!("expected re-rendered list, got {other:?}"),
    }
}
