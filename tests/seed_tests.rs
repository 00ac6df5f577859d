
use portfolio_site::{
    entities::{project::CategoryFilter, user::NewAdmin},
    seed::seed_content,
};
use test_utils::*;

#[actix_rt::test]
async fn seeding_twice_creates_each_row_once() {
    let app = TestApp::new();
    let admin = || NewAdmin {
        email: "Admin@Dimroid.com".into(),
        password: "Copper-Lantern-Ferry-47!".into(),
    };

    let first = seed_content(&app.state, Some(admin())).await.unwrap();
    assert_eq!(first.technologies_created, 9);
    assert_eq!(first.projects_created, 10);
    assert!(first.admin_created);

    let second = seed_content(&app.state, Some(admin())).await.unwrap();
    assert_eq!(second.technologies_created, 0);
    assert_eq!(second.technologies_existing, 9);
    assert_eq!(second.projects_created, 0);
    assert_eq!(second.projects_existing, 10);
    assert!(!second.admin_created);

    assert_eq!(app.projects.count(), 10);
    assert_eq!(app.users.users.lock()[0].email, "admin@dimroid.com");
}

#[actix_rt::test]
async fn seeded_content_drives_the_public_listings() {
    let app = TestApp::new();
    seed_content(&app.state, None).await.unwrap();

    let featured = app.state.project_handler.list_featured().await.unwrap();
    let titles: Vec<_> = featured.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Suncore", "Flashy", "Portfolio Website"]);

    let tools = app
        .state
        .project_handler
        .list_visible(&CategoryFilter::parse(Some("tools")))
        .await
        .unwrap();
    assert_eq!(tools.len(), 5);

    let detail = app.state.project_handler.get_visible_detail("suncore").await.unwrap();
    assert_eq!(detail.related.len(), 3);
    assert!(detail.related.iter().all(|p| p.category == detail.project.category));
}

#[actix_rt::test]
async fn weak_admin_password_is_refused() {
    let app = TestApp::new();
    let result = seed_content(
        &app.state,
        Some(NewAdmin {
            email: "admin@dimroid.com".into(),
            password: "password".into(),
        }),
    )
    .await;

    assert!(result.is_err());
    assert!(app.users.users.lock().is_empty());
}
