//! Server-rendered HTML for the public site.
//!
//! Every piece of stored text goes through [`escape_html`] before it is
//! written into markup; project descriptions are rendered as sanitized
//! Markdown on the detail page.

use crate::{
    constants::CONTACT_SUCCESS_MESSAGE,
    entities::{
        contact::ContactSubject,
        project::{CategoryFilter, Project, ProjectCategory, ProjectDetail},
        technology::Technology,
    },
    utils::markdown::{escape_html, safe_markdown_to_html},
};

#[derive(Debug, Clone)]
pub struct Pages {
    site_name: String,
    media_url: String,
}

impl Pages {
    pub fn new(site_name: &str, media_url: &str) -> Self {
        Pages {
            site_name: site_name.to_string(),
            media_url: media_url.to_string(),
        }
    }

    pub fn home(&self, featured: &[Project]) -> String {
        let mut body = String::from(
            "<section class=\"hero\"><h1>Hi, I build software that ships.</h1>\
             <p><a class=\"btn\" href=\"/project/\">See my work</a> \
             <a class=\"btn\" href=\"/contact/\">Get in touch</a></p></section>",
        );

        body.push_str("<section class=\"featured\"><h2>Featured Projects</h2>");
        if featured.is_empty() {
            body.push_str("<p class=\"empty\">No featured projects yet.</p>");
        } else {
            body.push_str("<div class=\"project-grid\">");
            for project in featured {
                body.push_str(&self.project_card(project));
            }
            body.push_str("</div>");
        }
        body.push_str("</section>");

        self.layout("Home", &body)
    }

    pub fn about(&self, technologies: &[Technology]) -> String {
        let mut body = String::from("<section class=\"about\"><h1>About</h1><h2>Skills</h2>");

        if technologies.is_empty() {
            body.push_str("<p class=\"empty\">No skills listed yet.</p>");
        } else {
            body.push_str("<ul class=\"skills\">");
            for tech in technologies {
                let icon = tech
                    .icon
                    .as_deref()
                    .map(|class| format!("<i class=\"{}\"></i> ", escape_html(class)))
                    .unwrap_or_default();
                let style = tech
                    .color
                    .as_deref()
                    .map(|color| format!(" style=\"color:{}\"", escape_html(color)))
                    .unwrap_or_default();
                let name = match tech.website.as_deref() {
                    Some(site) => format!(
                        "<a href=\"{}\" rel=\"noopener\">{}</a>",
                        escape_html(site),
                        escape_html(&tech.name)
                    ),
                    None => escape_html(&tech.name),
                };
                body.push_str(&format!(
                    "<li class=\"skill\" data-category=\"{}\"{}>{}{} <small>{}</small></li>",
                    escape_html(tech.category.label()),
                    style,
                    icon,
                    name,
                    escape_html(tech.category.label()),
                ));
            }
            body.push_str("</ul>");
        }
        body.push_str("</section>");

        self.layout("About", &body)
    }

    pub fn projects(&self, projects: &[Project], active: &CategoryFilter) -> String {
        let mut body = String::from("<section class=\"projects\"><h1>Projects</h1>");
        body.push_str(&category_tabs(active));

        if projects.is_empty() {
            body.push_str("<p class=\"empty\">No projects match this filter.</p>");
        } else {
            body.push_str("<div class=\"project-grid\">");
            for project in projects {
                body.push_str(&self.project_card(project));
            }
            body.push_str("</div>");
        }
        body.push_str("</section>");

        self.layout("Projects", &body)
    }

    pub fn project_detail(&self, detail: &ProjectDetail) -> String {
        let project = &detail.project;
        let mut body = format!(
            "<article class=\"project-detail\"><h1>{}</h1>\
             <p class=\"meta\"><span class=\"category\">{}</span> \
             <span class=\"status\">{}</span></p>",
            escape_html(&project.title),
            escape_html(project.category.label()),
            escape_html(project.status.label()),
        );

        if let Some(url) = project.image_url(&self.media_url) {
            body.push_str(&format!(
                "<img class=\"cover\" src=\"{}\" alt=\"{}\">",
                escape_html(&url),
                escape_html(&project.title)
            ));
        }

        body.push_str(&format!(
            "<div class=\"description\">{}</div>",
            safe_markdown_to_html(&project.description)
        ));
        body.push_str(&tech_tags(project));
        body.push_str(&project_links(project));

        if let (Some(start), end) = (project.start_date, project.end_date) {
            let end = end.map(|d| d.to_string()).unwrap_or_else(|| "present".to_string());
            body.push_str(&format!("<p class=\"dates\">{} to {}</p>", start, end));
        }

        if !detail.gallery.is_empty() {
            body.push_str("<section class=\"gallery\"><h2>Gallery</h2>");
            for image in &detail.gallery {
                body.push_str(&format!(
                    "<figure><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>",
                    escape_html(&image.url(&self.media_url)),
                    escape_html(&image.caption),
                    escape_html(&image.caption),
                ));
            }
            body.push_str("</section>");
        }

        if !detail.related.is_empty() {
            body.push_str("<section class=\"related\"><h2>Related Projects</h2><div class=\"project-grid\">");
            for related in &detail.related {
                body.push_str(&self.project_card(related));
            }
            body.push_str("</div></section>");
        }
        body.push_str("</article>");

        self.layout(&project.title, &body)
    }

    /// Contact page; `acknowledged` adds the thank-you banner after a post.
    pub fn contact(&self, acknowledged: bool) -> String {
        let mut body = String::from("<section class=\"contact\"><h1>Contact</h1>");

        if acknowledged {
            body.push_str(&format!(
                "<div class=\"alert alert-success\">{}</div>",
                escape_html(CONTACT_SUCCESS_MESSAGE)
            ));
        }

        let options: String = ContactSubject::ALL
            .iter()
            .map(|s| format!("<option value=\"{}\">{}</option>", s.as_str(), escape_html(s.label())))
            .collect();

        body.push_str(&format!(
            "<form method=\"post\" action=\"/contact/\">\
             <label>Name <input name=\"name\" required></label>\
             <label>Email <input type=\"email\" name=\"email\" required></label>\
             <label>Subject <select name=\"subject\" required>{}</select></label>\
             <label>Message <textarea name=\"message\" required></textarea></label>\
             <label><input type=\"checkbox\" name=\"newsletter\"> Subscribe to updates</label>\
             <button type=\"submit\">Send</button></form></section>",
            options
        ));

        self.layout("Contact", &body)
    }

    pub fn not_found(&self) -> String {
        self.layout(
            "Not Found",
            "<section class=\"not-found\"><h1>404</h1><p>The page you are looking for does not exist.</p>\
             <p><a href=\"/project/\">Back to projects</a></p></section>",
        )
    }

    fn project_card(&self, project: &Project) -> String {
        let image = project
            .thumbnail_url(&self.media_url)
            .or_else(|| project.image_url(&self.media_url))
            .map(|url| {
                format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    escape_html(&url),
                    escape_html(&project.title)
                )
            })
            .unwrap_or_default();
        let badge = if project.featured {
            "<span class=\"badge\">Featured</span>"
        } else {
            ""
        };

        format!(
            "<div class=\"project-card\" data-category=\"{}\">{}{}\
             <h3><a href=\"/project/{}/\">{}</a></h3><p>{}</p>{}{}</div>",
            escape_html(project.category.as_str()),
            image,
            badge,
            escape_html(&project.slug),
            escape_html(&project.title),
            escape_html(&project.short_description),
            tech_tags(project),
            project_links(project),
        )
    }

    fn layout(&self, title: &str, body: &str) -> String {
        format!(
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
             <title>{} | {}</title></head><body>\
             <nav><a href=\"/\">Home</a> <a href=\"/about/\">About</a> \
             <a href=\"/project/\">Projects</a> <a href=\"/contact/\">Contact</a></nav>\
             <main>{}</main><footer>{}</footer></body></html>",
            escape_html(title),
            escape_html(&self.site_name),
            body,
            escape_html(&self.site_name),
        )
    }
}

fn category_tabs(active: &CategoryFilter) -> String {
    let current = active.as_query_value();
    let mut tabs = String::from("<nav class=\"filters\">");

    let mut push_tab = |value: &str, label: &str| {
        let class = if value == current { " class=\"active\"" } else { "" };
        tabs.push_str(&format!(
            "<a href=\"/project/?category={}\"{}>{}</a>",
            escape_html(value),
            class,
            escape_html(label)
        ));
    };

    push_tab("all", "All");
    push_tab("featured", "Featured");
    for category in ProjectCategory::ALL {
        push_tab(category.as_str(), category.label());
    }

    tabs.push_str("</nav>");
    tabs
}

fn tech_tags(project: &Project) -> String {
    let tags: String = project
        .technologies_list()
        .iter()
        .map(|tech| format!("<span class=\"tag\">{}</span>", escape_html(tech)))
        .collect();
    format!("<div class=\"tags\">{}</div>", tags)
}

fn project_links(project: &Project) -> String {
    let mut links = format!(
        "<div class=\"links\"><a href=\"{}\" rel=\"noopener\">GitHub</a>",
        escape_html(&project.github_url)
    );
    if let Some(live) = project.live_url.as_deref().filter(|_| project.has_live_demo()) {
        links.push_str(&format!(" <a href=\"{}\" rel=\"noopener\">Live Demo</a>", escape_html(live)));
    }
    if let Some(docs) = project.documentation_url.as_deref() {
        links.push_str(&format!(" <a href=\"{}\" rel=\"noopener\">Docs</a>", escape_html(docs)));
    }
    links.push_str("</div>");
    links
}
