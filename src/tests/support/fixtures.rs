//! Shared payloads and entities for content tests.
//!
//! `*_payload` helpers return request bodies that pass validation; `sample_*`
//! helpers run those bodies through the same create path the repositories use.

use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::content::application::domain::{
    About, BlogPost, Education, Project, Resource, Settings, Skill, SocialLink, UserInfo,
    WorkExperience,
};
use crate::content::application::schema::{materialize, Draft};

fn build<E: Resource>(payload: Value) -> E {
    let draft = Draft::<E>::parse(payload).expect("fixture payload must validate");
    materialize(draft, Uuid::new_v4(), Utc::now()).expect("fixture must materialize")
}

// ──────────────────────────────────────────────────────────
// Payloads
// ──────────────────────────────────────────────────────────

pub fn project_payload(title: &str, order: Option<i32>) -> Value {
    let mut payload = json!({
        "title": title,
        "description": "A personal portfolio built with Rust",
        "image": "/images/portfolio.png",
        "technologies": ["Rust", "actix-web"],
        "category": "Web"
    });
    if let Some(order) = order {
        payload["order"] = json!(order);
    }
    payload
}

pub fn blog_post_payload(slug: &str) -> Value {
    json!({
        "title": "Hello World",
        "slug": slug,
        "content": "First post.",
        "author": "Jane Doe"
    })
}

pub fn social_link_payload(name: &str, order: i32) -> Value {
    json!({
        "name": name,
        "icon": name.to_lowercase(),
        "url": format!("https://example.com/{}", name.to_lowercase()),
        "order": order
    })
}

pub fn work_experience_payload(company: &str, order: i32) -> Value {
    json!({
        "company": company,
        "timeframe": "2021 - 2024",
        "role": "Backend Engineer",
        "order": order
    })
}

pub fn education_payload(name: &str, order: i32) -> Value {
    json!({
        "name": name,
        "description": "BSc Computer Science",
        "order": order
    })
}

pub fn skill_payload(title: &str, order: i32) -> Value {
    json!({
        "title": title,
        "description": "Daily driver",
        "order": order
    })
}

pub fn user_info_payload() -> Value {
    json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "title": "Software Engineer",
        "role": "Backend",
        "timezone": "Europe/Berlin",
        "email": "jane@example.com"
    })
}

pub fn settings_payload(site_name: &str) -> Value {
    json!({
        "siteName": site_name,
        "siteDescription": "Portfolio and writing",
        "siteUrl": "https://jane.dev",
        "newsletter": { "enabled": true, "title": "Weekly", "description": "Notes" },
        "theme": { "primaryColor": "#3b82f6", "fontFamily": "Inter", "colorTheme": "dark" }
    })
}

pub fn about_payload() -> Value {
    json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "role": "Software Engineer",
        "avatar": "/images/avatar.jpg",
        "location": "Berlin",
        "title": "About me",
        "description": "I build backends.",
        "introTitle": "Introduction",
        "introDescription": "Hi there.",
        "workTitle": "Work",
        "studiesTitle": "Studies",
        "technicalTitle": "Technical skills"
    })
}

// ──────────────────────────────────────────────────────────
// Entities
// ──────────────────────────────────────────────────────────

pub fn sample_project(title: &str, order: Option<i32>) -> Project {
    build(project_payload(title, order))
}

pub fn sample_blog_post(slug: &str) -> BlogPost {
    build(blog_post_payload(slug))
}

pub fn sample_social_link(name: &str, order: i32) -> SocialLink {
    build(social_link_payload(name, order))
}

pub fn sample_work_experience(company: &str, order: i32) -> WorkExperience {
    build(work_experience_payload(company, order))
}

pub fn sample_education(name: &str, order: i32) -> Education {
    build(education_payload(name, order))
}

pub fn sample_skill(title: &str, order: i32) -> Skill {
    build(skill_payload(title, order))
}

pub fn sample_user_info() -> UserInfo {
    build(user_info_payload())
}

pub fn sample_settings() -> Settings {
    build(settings_payload("Jane Doe"))
}

pub fn sample_about() -> About {
    build(about_payload())
}
