mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;

use labadmin_client::transport::Method;
use labadmin_client::{ClientError, PageRequest};
use labadmin_console::forms::{CategoryForm, NewsForm, UserForm};
use labadmin_console::notify::{AlwaysConfirm, CollectingNotifier};
use labadmin_console::resources::{
    CategoriesResource, MyAchievementsResource, NewsResource, PublicAchievementsSource,
    UsersResource,
};
use labadmin_console::{ControllerError, Flag, ListController, ListSource, Pager};
use labadmin_core::codes::{Identity, NewsStatus, NewsType};
use labadmin_core::error::CoreError;
use labadmin_core::session::SessionContext;

use common::{session, teacher, ScriptedTransport};

fn controller<R: labadmin_console::ResourceApi>(api: R) -> ListController<R> {
    controller_as(api, session(Identity::Admin))
}

fn controller_as<R: labadmin_console::ResourceApi>(
    api: R,
    session: SessionContext,
) -> ListController<R> {
    ListController::new(
        api,
        session,
        Arc::new(CollectingNotifier::new()),
        Arc::new(AlwaysConfirm),
    )
}

#[tokio::test]
async fn test_user_dialog_sends_create_then_update_bodies() {
    let backend = ScriptedTransport::default();
    let users = controller(UsersResource::new(backend.client()));

    users.open_create().await;
    let form = UserForm {
        username: Some("zhang3".into()),
        real_name: Some("Zhang San".into()),
        password: Some("secret1".into()),
        identity: Some(Identity::Student),
        email: Some(String::new()),
        ..UserForm::default()
    };
    users.submit(form).await.unwrap();

    let create = backend.requests()[0].clone();
    assert_eq!(create.method, Method::Post);
    assert_eq!(create.path, "/lab/users/crud");
    let body = create.body.as_ref().unwrap();
    assert_eq!(body["password"], "secret1");
    assert!(body["email"].is_null());

    let record = serde_json::from_value(json!({
        "id": 4, "username": "zhang3", "realName": "Zhang San", "identity": 3
    }))
    .unwrap();
    users.open_edit(&record).await;
    users.submit_dialog().await.unwrap();

    let update = backend
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Put)
        .unwrap();
    assert_eq!(update.path, "/lab/users/crud/4");
    assert!(update.body.unwrap().get("password").is_none());
}

#[tokio::test]
async fn test_user_create_requires_password() {
    let backend = ScriptedTransport::default();
    let users = controller(UsersResource::new(backend.client()));
    users.open_create().await;

    let result = users
        .submit(UserForm {
            username: Some("li4".into()),
            real_name: Some("Li Si".into()),
            ..UserForm::default()
        })
        .await;
    assert_matches!(result, Err(ControllerError::Validation(r)) if r.has_field("password"));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_members_edit_only_themselves() {
    let backend = ScriptedTransport::default();
    let users = controller_as(UsersResource::new(backend.client()), teacher());
    let other = serde_json::from_value(json!({
        "id": 4, "username": "zhang3", "realName": "Zhang San", "identity": 3
    }))
    .unwrap();

    users.open_edit(&other).await;
    assert_matches!(
        users.submit_dialog().await,
        Err(ControllerError::Core(CoreError::Forbidden(_)))
    );
    assert!(backend.requests().is_empty());
    assert!(users.dialog().await.is_some());

    let me = serde_json::from_value(json!({
        "id": 2, "username": "wang", "realName": "Prof. Wang", "identity": 2
    }))
    .unwrap();
    users.open_edit(&me).await;
    users.submit_dialog().await.unwrap();
    assert_eq!(backend.requests()[0].path, "/lab/users/crud/2");
}

#[tokio::test]
async fn test_user_active_flag_uses_batch_endpoint() {
    let backend = ScriptedTransport::default();
    backend.respond(json!({
        "total": 1,
        "rows": [{ "id": 5, "username": "wu", "identity": 3, "isActive": true }]
    }));
    let users = controller(UsersResource::new(backend.client()));
    users.search().await.unwrap();

    backend.respond(json!(null)).respond(json!({ "total": 1, "rows": [
        { "id": 5, "username": "wu", "identity": 3, "isActive": false }
    ]}));
    assert!(!users.toggle_flag(5, Flag::Active).await.unwrap());

    let request = backend.requests()[1].clone();
    assert_eq!(request.path, "/lab/users/crud/batch/status");
    assert_eq!(request.query_value("isActive"), Some("false"));
    assert_eq!(request.body, Some(json!([5])));
}

#[tokio::test]
async fn test_category_edit_uses_update_command() {
    let backend = ScriptedTransport::default();
    let categories = controller(CategoriesResource::new(backend.client()));

    let record = serde_json::from_value(json!({
        "id": 11, "parentId": 1, "categoryName": "Journal", "sortOrder": 3
    }))
    .unwrap();
    categories.open_edit(&record).await;
    categories
        .edit_form(|f: &mut CategoryForm| f.category_name = Some("Journals".into()))
        .await
        .unwrap();
    categories.submit_dialog().await.unwrap();

    let update = backend.requests()[0].clone();
    assert_eq!(update.method, Method::Put);
    assert_eq!(update.path, "/lab/achievement-categories/11");
    let body = update.body.as_ref().unwrap();
    assert_eq!(body["categoryName"], "Journals");
    assert_eq!(body["parentId"], 1);
}

#[tokio::test]
async fn test_category_reorder_numbers_from_zero() {
    let backend = ScriptedTransport::default();
    let categories = CategoriesResource::new(backend.client());

    categories.reorder(&[7, 3, 9]).await.unwrap();
    let body = backend.requests()[0].body.clone().unwrap();
    assert_eq!(
        body,
        json!({ "items": [
            { "id": 7, "sortOrder": 0 },
            { "id": 3, "sortOrder": 1 },
            { "id": 9, "sortOrder": 2 }
        ]})
    );
}

#[tokio::test]
async fn test_category_tree_passes_inactive_switch() {
    let backend = ScriptedTransport::default();
    backend.respond(json!([
        { "id": 1, "categoryName": "Papers", "children": [
            { "id": 11, "parentId": 1, "categoryName": "Journal" }
        ]}
    ]));
    let tree = CategoriesResource::new(backend.client()).tree(true).await.unwrap();
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(backend.requests()[0].query_value("includeInactive"), Some("true"));
}

#[tokio::test]
async fn test_news_publish_flag_maps_to_status() {
    let backend = ScriptedTransport::default();
    backend.respond(json!({
        "total": 1,
        "rows": [{ "id": 3, "title": "Open day", "type": 2, "status": 2 }]
    }));
    let news = controller(NewsResource::new(backend.client()));
    news.search().await.unwrap();

    backend.fail_next(500, "News is locked");
    let result = news.toggle_flag(3, Flag::Published).await;
    assert_matches!(result, Err(ControllerError::Client(e)) if e.message() == "News is locked");
    let row = news.pager().find(3).await.unwrap();
    assert_eq!(row.status, NewsStatus::Draft);

    let request = backend.requests()[1].clone();
    assert_eq!(request.path, "/lab/news/3/status");
    assert_eq!(request.query_value("status"), Some("1"));
}

#[tokio::test]
async fn test_news_dialog_defaults_author() {
    let backend = ScriptedTransport::default();
    let news = controller(NewsResource::new(backend.client()));
    news.open_create().await;

    let form = news.dialog().await.unwrap().form;
    assert_eq!(form.author.as_deref(), Some("Prof. Wang"));
    news.submit(NewsForm {
        title: Some("Group retreat".into()),
        content: Some("The lab retreat is scheduled for May.".into()),
        kind: Some(NewsType::Event),
        ..form
    })
    .await
    .unwrap();
    let body = backend.requests()[0].body.clone().unwrap();
    assert_eq!(body["type"], 2);
    assert_eq!(body["status"], 2);
}

#[tokio::test]
async fn test_my_achievements_visibility_only() {
    let backend = ScriptedTransport::default();
    backend.respond(json!({
        "total": 1,
        "rows": [{ "id": 8, "title": "Mine", "type": 1, "myVisibility": true }]
    }));
    let pager = Pager::new(
        Arc::new(MyAchievementsResource::new(backend.client())),
        Arc::new(CollectingNotifier::new()),
    )
    .with_session(teacher());
    pager.search().await.unwrap();

    assert_matches!(
        pager.toggle_flag(8, Flag::Published).await,
        Err(ControllerError::UnsupportedFlag(Flag::Published))
    );
    assert!(!pager.toggle_flag(8, Flag::Visibility).await.unwrap());
    assert_eq!(backend.requests()[1].path, "/lab/my-achievements/8/visibility");
}

#[tokio::test]
async fn test_public_source_reads_numbered_pages() {
    let backend = ScriptedTransport::default();
    backend.respond(json!({
        "total": 21, "pageNum": 3, "pageSize": 10,
        "list": [{ "id": 1, "title": "Open paper", "type": 1, "journal": "Nature" }]
    }));
    let source = PublicAchievementsSource::new(backend.client());

    let page = source
        .fetch(&Default::default(), PageRequest::new(3, 10))
        .await
        .unwrap();
    assert_eq!(page.total, 21);
    assert_eq!(page.items[0].source(), "Nature");
    assert_eq!(backend.requests()[0].path, "/open/achievements");
}

#[tokio::test]
async fn test_public_lookup_of_hidden_achievement() {
    let backend = ScriptedTransport::default();
    let source = PublicAchievementsSource::new(backend.client());

    assert_matches!(
        source.get(12).await,
        Err(ControllerError::Client(ClientError::Core(CoreError::NotFound { id: 12, .. })))
    );
    assert_eq!(backend.requests()[0].path, "/open/achievements/12");
}
