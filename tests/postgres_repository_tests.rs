//! Query-layer tests against a live Postgres. `sqlx::test` creates a fresh
//! database per test from `DATABASE_URL` and applies `./migrations`.

use std::sync::Arc;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use portfolio_site::{
    entities::{
        contact::{ContactInsert, ContactListFilter, ContactSubject},
        project::{CategoryFilter, NewProjectRequest, Project, ProjectCategory, ProjectInsert, ProjectListFilter, ProjectStatus},
        project_image::NewProjectImageRequest,
        technology::{TechnologyCategory, TechnologyInsert, TechnologyListFilter},
        validation::MAX_SLUG_LENGTH,
    },
    errors::AppError,
    repositories::{
        contact::ContactRepository,
        project::ProjectRepository,
        sqlx_repo::{SqlxContactRepo, SqlxProjectRepo, SqlxTechnologyRepo},
        technology::TechnologyRepository,
    },
    use_cases::projects::ProjectHandler,
};

fn project_insert(title: &str, category: ProjectCategory, featured: bool, visible: bool, order: i32) -> ProjectInsert {
    let mut insert = ProjectInsert {
        title: title.to_string(),
        slug: String::new(),
        slug_is_custom: false,
        description: format!("{} description", title),
        short_description: String::new(),
        category,
        status: ProjectStatus::Completed,
        featured,
        visible,
        github_url: "https://github.com/Dimeji-G/example".to_string(),
        live_url: None,
        documentation_url: None,
        image: None,
        thumbnail: None,
        technologies: "Rust, Actix".to_string(),
        order,
        start_date: None,
        end_date: None,
    };
    insert.prepare();
    insert
}

/// Pins both timestamps so the `created_at` tie-break is deterministic.
async fn backdate(pool: &PgPool, id: Uuid, seconds_ago: i64) {
    let at = Utc::now() - Duration::seconds(seconds_ago);
    sqlx::query("UPDATE projects SET created_at = $1, updated_at = $1 WHERE id = $2")
        .bind(at)
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
}

struct Catalogue {
    alpha: Project,
    echo: Project,
}

/// Six projects covering every sort key plus one hidden row.
async fn seed_catalogue(pool: &PgPool, repo: &SqlxProjectRepo) -> Catalogue {
    let rows = [
        ("Alpha", ProjectCategory::Gui, false, true, 1, 60),
        ("Bravo", ProjectCategory::Gui, true, true, 1, 50),
        ("Charlie", ProjectCategory::Gui, false, true, 0, 40),
        ("Delta", ProjectCategory::Web, true, true, 2, 30),
        ("Echo", ProjectCategory::Web, false, true, 2, 10),
        ("Foxtrot", ProjectCategory::Web, false, true, 2, 20),
        ("Hidden", ProjectCategory::Gui, true, false, 0, 5),
    ];

    let mut created = Vec::new();
    for (title, category, featured, visible, order, age) in rows {
        let project = repo
            .create_project(&project_insert(title, category, featured, visible, order))
            .await
            .unwrap();
        backdate(pool, project.id, age).await;
        created.push(project);
    }

    let alpha = repo.get_project_by_id(&created[0].id).await.unwrap().unwrap();
    let echo = repo.get_project_by_id(&created[4].id).await.unwrap().unwrap();
    Catalogue { alpha, echo }
}

fn titles(projects: &[Project]) -> Vec<&str> {
    projects.iter().map(|p| p.title.as_str()).collect()
}

#[sqlx::test(migrations = "./migrations")]
async fn listing_follows_order_then_featured_then_newest(pool: PgPool) {
    let repo = SqlxProjectRepo::new(pool.clone());
    seed_catalogue(&pool, &repo).await;

    let all = repo.list_visible_projects(&CategoryFilter::All).await.unwrap();
    assert_eq!(titles(&all), ["Charlie", "Bravo", "Alpha", "Delta", "Echo", "Foxtrot"]);

    let admin_all = repo.list_projects(&ProjectListFilter::default()).await.unwrap();
    assert_eq!(
        titles(&admin_all),
        ["Hidden", "Charlie", "Bravo", "Alpha", "Delta", "Echo", "Foxtrot"]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn category_filters_match_exactly_and_skip_hidden_rows(pool: PgPool) {
    let repo = SqlxProjectRepo::new(pool.clone());
    seed_catalogue(&pool, &repo).await;

    let gui = repo
        .list_visible_projects(&CategoryFilter::Category(ProjectCategory::Gui))
        .await
        .unwrap();
    assert_eq!(titles(&gui), ["Charlie", "Bravo", "Alpha"]);

    let featured = repo.list_visible_projects(&CategoryFilter::Featured).await.unwrap();
    assert_eq!(titles(&featured), ["Bravo", "Delta"]);

    let unmatched = repo.list_visible_projects(&CategoryFilter::Unmatched).await.unwrap();
    assert!(unmatched.is_empty());

    let data = repo
        .list_visible_projects(&CategoryFilter::Category(ProjectCategory::Data))
        .await
        .unwrap();
    assert!(data.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn featured_and_related_listings_are_limited(pool: PgPool) {
    let repo = SqlxProjectRepo::new(pool.clone());
    let catalogue = seed_catalogue(&pool, &repo).await;

    let home = repo.list_featured_projects(1).await.unwrap();
    assert_eq!(titles(&home), ["Bravo"]);

    let related = repo.list_related_projects(&catalogue.alpha, 3).await.unwrap();
    assert_eq!(titles(&related), ["Charlie", "Bravo"]);

    let first_related = repo.list_related_projects(&catalogue.alpha, 1).await.unwrap();
    assert_eq!(titles(&first_related), ["Charlie"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn detail_lookup_ignores_hidden_projects(pool: PgPool) {
    let repo = SqlxProjectRepo::new(pool.clone());
    seed_catalogue(&pool, &repo).await;

    assert!(repo.get_visible_project_by_slug("alpha").await.unwrap().is_some());
    assert!(repo.get_visible_project_by_slug("hidden").await.unwrap().is_none());
    assert!(repo.get_visible_project_by_slug("missing").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn admin_filters_combine_flags_and_search(pool: PgPool) {
    let repo = SqlxProjectRepo::new(pool.clone());
    seed_catalogue(&pool, &repo).await;

    let hidden = repo
        .list_projects(&ProjectListFilter {
            visible: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(titles(&hidden), ["Hidden"]);

    let searched = repo
        .list_projects(&ProjectListFilter {
            search: Some("ECHO".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(titles(&searched), ["Echo"]);

    let gui_featured = repo
        .list_projects(&ProjectListFilter {
            category: Some(ProjectCategory::Gui),
            featured: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(titles(&gui_featured), ["Hidden", "Bravo"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn batch_flags_update_only_listed_rows_and_touch_updated_at(pool: PgPool) {
    let repo = SqlxProjectRepo::new(pool.clone());
    let catalogue = seed_catalogue(&pool, &repo).await;

    let ids = [catalogue.alpha.id, catalogue.echo.id, Uuid::new_v4()];
    assert_eq!(repo.set_featured(&ids, true).await.unwrap(), 2);

    let alpha = repo.get_project_by_id(&catalogue.alpha.id).await.unwrap().unwrap();
    assert!(alpha.featured);
    assert!(alpha.updated_at > catalogue.alpha.updated_at);

    assert_eq!(repo.set_visible(&[catalogue.echo.id], false).await.unwrap(), 1);
    let visible = repo.list_visible_projects(&CategoryFilter::All).await.unwrap();
    assert!(!titles(&visible).contains(&"Echo"));
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_slug_is_a_conflict(pool: PgPool) {
    let repo = SqlxProjectRepo::new(pool);
    repo.create_project(&project_insert("Suncore", ProjectCategory::Tools, false, true, 0))
        .await
        .unwrap();

    let err = repo
        .create_project(&project_insert("Suncore", ProjectCategory::Tools, false, true, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_project_removes_its_gallery(pool: PgPool) {
    let repo = SqlxProjectRepo::new(pool);
    let project = repo
        .create_project(&project_insert("Suncore", ProjectCategory::Tools, false, true, 0))
        .await
        .unwrap();

    let image = NewProjectImageRequest {
        image: "projects/gallery/mixer.png".into(),
        caption: "Mixer".into(),
        order: 0,
    };
    repo.add_project_image(&project.id, &image).await.unwrap();
    assert_eq!(repo.list_project_images(&project.id).await.unwrap().len(), 1);

    repo.delete_project(&project.id).await.unwrap();
    assert!(repo.list_project_images(&project.id).await.unwrap().is_empty());

    let orphan = repo.add_project_image(&project.id, &image).await.unwrap_err();
    assert!(matches!(orphan, AppError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn transliterated_titles_get_slugs_that_fit_the_column(pool: PgPool) {
    let handler = ProjectHandler::new(Arc::new(SqlxProjectRepo::new(pool)));
    let request = || -> NewProjectRequest {
        serde_json::from_value(serde_json::json!({
            "title": "ß".repeat(200),
            "description": "Long German title",
            "github_url": "https://github.com/Dimeji-G/strasse",
        }))
        .unwrap()
    };

    let first = handler.create_project(request()).await.unwrap();
    let second = handler.create_project(request()).await.unwrap();

    assert!(first.slug.len() <= MAX_SLUG_LENGTH);
    assert!(second.slug.len() <= MAX_SLUG_LENGTH);
    assert!(second.slug.ends_with("-2"));

    let han = handler
        .create_project(
            serde_json::from_value(serde_json::json!({
                "title": "漢".repeat(100),
                "description": "Han characters",
                "github_url": "https://github.com/Dimeji-G/han",
            }))
            .unwrap(),
        )
        .await
        .unwrap();
    assert!(han.slug.len() <= MAX_SLUG_LENGTH);
}

#[sqlx::test(migrations = "./migrations")]
async fn technologies_filter_by_category_and_name(pool: PgPool) {
    let repo = SqlxTechnologyRepo::new(pool);
    for (name, category) in [
        ("React", TechnologyCategory::Framework),
        ("Python", TechnologyCategory::Language),
        ("Django", TechnologyCategory::Framework),
    ] {
        repo.create_technology(&TechnologyInsert {
            name: name.into(),
            category,
            icon: None,
            color: None,
            website: None,
        })
        .await
        .unwrap();
    }

    let names = |list: Vec<portfolio_site::entities::technology::Technology>| -> Vec<String> {
        list.into_iter().map(|t| t.name).collect()
    };

    let all = repo.list_technologies(&TechnologyListFilter::default()).await.unwrap();
    assert_eq!(names(all), ["Django", "Python", "React"]);

    let frameworks = repo
        .list_technologies(&TechnologyListFilter {
            category: Some(TechnologyCategory::Framework),
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(names(frameworks), ["Django", "React"]);

    let searched = repo
        .list_technologies(&TechnologyListFilter {
            category: None,
            search: Some("pyth".into()),
        })
        .await
        .unwrap();
    assert_eq!(names(searched), ["Python"]);

    let duplicate = repo
        .create_technology(&TechnologyInsert {
            name: "React".into(),
            category: TechnologyCategory::Library,
            icon: None,
            color: None,
            website: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(duplicate, AppError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn contacts_search_and_batch_replied(pool: PgPool) {
    let repo = SqlxContactRepo::new(pool);
    let mut ids = Vec::new();
    for (name, email, message) in [
        ("Grace", "grace@example.com", "Internship for summer"),
        ("Linus", "linus@kernel.example", "Freelance scraping job"),
        ("Ada", "ada@example.com", "Question about Suncore"),
    ] {
        let contact = repo
            .create_contact(&ContactInsert {
                name: name.into(),
                email: email.into(),
                subject: ContactSubject::Other,
                message: message.into(),
                newsletter: false,
            })
            .await
            .unwrap();
        ids.push(contact.id);
    }

    for (term, expected) in [("grace", "Grace"), ("KERNEL", "Linus"), ("suncore", "Ada")] {
        let found = repo
            .list_contacts(&ContactListFilter {
                search: Some(term.into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1, "search {term}");
        assert_eq!(found[0].name, expected);
    }

    assert_eq!(repo.set_replied(&ids[..2], true).await.unwrap(), 2);
    let pending = repo
        .list_contacts(&ContactListFilter {
            replied: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].name, "Ada");
}
