use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::ordering::OrderingPolicy;
use super::resource::{CollectionResource, Resource, SingletonResource, Timestamps};
use super::settings::SubDocument;
#[cfg(test)]
use super::settings::{decode, ContactFormSettings, NewsletterSettings, ThemeSettings};
use crate::content::application::schema::{DefaultValue, FieldSpec, FieldType};

use FieldType::{Boolean, Email, Integer, OptionalInteger, OptionalText, Slug, Text, TextList};

//
// ──────────────────────────────────────────────────────────
// Project
// ──────────────────────────────────────────────────────────
//

pub const PROJECT_STATUSES: &[&str] = &["draft", "published"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub image: String,
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub category: String,
    pub status: ProjectStatus,
    pub featured: bool,
    pub order: Option<i32>,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const PROJECT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", Text),
    FieldSpec::required("description", Text),
    FieldSpec::optional("longDescription", OptionalText),
    FieldSpec::required("image", Text),
    FieldSpec::required("technologies", TextList),
    FieldSpec::optional("githubUrl", OptionalText),
    FieldSpec::optional("liveUrl", OptionalText),
    FieldSpec::required("category", Text),
    FieldSpec::defaulted(
        "status",
        FieldType::Choice(PROJECT_STATUSES),
        DefaultValue::Text("published"),
    ),
    FieldSpec::defaulted("featured", Boolean, DefaultValue::Bool(false)),
    FieldSpec::optional("order", OptionalInteger),
    FieldSpec::optional("year", OptionalInteger),
];

impl Resource for Project {
    const PATH: &'static str = "projects";
    const LABEL: &'static str = "Project";
    const CODE: &'static str = "PROJECT";
    const FIELDS: &'static [FieldSpec] = PROJECT_FIELDS;
    const TIMESTAMPS: Timestamps = Timestamps::CreatedAndUpdated;

    fn id(&self) -> Uuid {
        self.id
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }
}

impl CollectionResource for Project {
    const ORDERING: OrderingPolicy = OrderingPolicy::ManualDescending;

    fn manual_order(&self) -> Option<i32> {
        self.order
    }
}

//
// ──────────────────────────────────────────────────────────
// Blog post
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    /// Unique among all posts.
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub featured: bool,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub published: bool,
}

const BLOG_POST_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", Text),
    FieldSpec::required("slug", Slug),
    FieldSpec::required("content", Text),
    FieldSpec::optional("excerpt", OptionalText),
    FieldSpec::required("author", Text),
    FieldSpec::optional("publishedAt", FieldType::Timestamp),
    FieldSpec::defaulted("featured", Boolean, DefaultValue::Bool(false)),
    FieldSpec::defaulted("tags", TextList, DefaultValue::EmptyList),
    FieldSpec::optional("category", OptionalText),
    FieldSpec::optional("image", OptionalText),
    FieldSpec::defaulted("published", Boolean, DefaultValue::Bool(false)),
];

impl Resource for BlogPost {
    const PATH: &'static str = "blog-posts";
    const LABEL: &'static str = "Blog post";
    const CODE: &'static str = "BLOG_POST";
    const FIELDS: &'static [FieldSpec] = BLOG_POST_FIELDS;
    const TIMESTAMPS: Timestamps = Timestamps::UpdatedOnly;

    fn id(&self) -> Uuid {
        self.id
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("slug", self.slug.clone())]
    }
}

impl CollectionResource for BlogPost {
    const ORDERING: OrderingPolicy = OrderingPolicy::RecencyDescending;

    fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }
}

//
// ──────────────────────────────────────────────────────────
// Manually ordered collections
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub url: String,
    pub order: i32,
}

const SOCIAL_LINK_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", Text),
    FieldSpec::required("icon", Text),
    FieldSpec::required("url", Text),
    FieldSpec::required("order", Integer),
];

impl Resource for SocialLink {
    const PATH: &'static str = "social-links";
    const LABEL: &'static str = "Social link";
    const CODE: &'static str = "SOCIAL_LINK";
    const FIELDS: &'static [FieldSpec] = SOCIAL_LINK_FIELDS;
    const TIMESTAMPS: Timestamps = Timestamps::None;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl CollectionResource for SocialLink {
    const ORDERING: OrderingPolicy = OrderingPolicy::ManualAscending;

    fn manual_order(&self) -> Option<i32> {
        Some(self.order)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: Uuid,
    pub company: String,
    pub timeframe: String,
    pub role: String,
    pub achievements: Option<String>,
    pub images: Option<String>,
    pub order: i32,
}

const WORK_EXPERIENCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("company", Text),
    FieldSpec::required("timeframe", Text),
    FieldSpec::required("role", Text),
    FieldSpec::optional("achievements", OptionalText),
    FieldSpec::optional("images", OptionalText),
    FieldSpec::required("order", Integer),
];

impl Resource for WorkExperience {
    const PATH: &'static str = "work-experiences";
    const LABEL: &'static str = "Work experience";
    const CODE: &'static str = "WORK_EXPERIENCE";
    const FIELDS: &'static [FieldSpec] = WORK_EXPERIENCE_FIELDS;
    const TIMESTAMPS: Timestamps = Timestamps::None;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl CollectionResource for WorkExperience {
    const ORDERING: OrderingPolicy = OrderingPolicy::ManualAscending;

    fn manual_order(&self) -> Option<i32> {
        Some(self.order)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub order: i32,
}

const EDUCATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", Text),
    FieldSpec::required("description", Text),
    FieldSpec::required("order", Integer),
];

impl Resource for Education {
    const PATH: &'static str = "education";
    const LABEL: &'static str = "Education";
    const CODE: &'static str = "EDUCATION";
    const FIELDS: &'static [FieldSpec] = EDUCATION_FIELDS;
    const TIMESTAMPS: Timestamps = Timestamps::None;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl CollectionResource for Education {
    const ORDERING: OrderingPolicy = OrderingPolicy::ManualAscending;

    fn manual_order(&self) -> Option<i32> {
        Some(self.order)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub images: Option<String>,
    pub order: i32,
}

const SKILL_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", Text),
    FieldSpec::required("description", Text),
    FieldSpec::optional("images", OptionalText),
    FieldSpec::required("order", Integer),
];

impl Resource for Skill {
    const PATH: &'static str = "skills";
    const LABEL: &'static str = "Skill";
    const CODE: &'static str = "SKILL";
    const FIELDS: &'static [FieldSpec] = SKILL_FIELDS;
    const TIMESTAMPS: Timestamps = Timestamps::None;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl CollectionResource for Skill {
    const ORDERING: OrderingPolicy = OrderingPolicy::ManualAscending;

    fn manual_order(&self) -> Option<i32> {
        Some(self.order)
    }
}

//
// ──────────────────────────────────────────────────────────
// User info (singleton)
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub role: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub location: Option<String>,
    pub timezone: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub languages: Vec<String>,
    pub social_links: Option<String>,
    pub skills: Vec<String>,
    pub resume: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const USER_INFO_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("firstName", Text),
    FieldSpec::required("lastName", Text),
    FieldSpec::required("title", Text),
    FieldSpec::required("role", Text),
    FieldSpec::optional("bio", OptionalText),
    FieldSpec::optional("avatar", OptionalText),
    FieldSpec::optional("location", OptionalText),
    FieldSpec::required("timezone", Text),
    FieldSpec::required("email", Email),
    FieldSpec::optional("phone", OptionalText),
    FieldSpec::optional("website", OptionalText),
    FieldSpec::optional("github", OptionalText),
    FieldSpec::optional("linkedin", OptionalText),
    FieldSpec::optional("twitter", OptionalText),
    FieldSpec::defaulted("languages", TextList, DefaultValue::EmptyList),
    FieldSpec::optional("socialLinks", OptionalText),
    FieldSpec::defaulted("skills", TextList, DefaultValue::EmptyList),
    FieldSpec::optional("resume", OptionalText),
];

impl Resource for UserInfo {
    const PATH: &'static str = "user-info";
    const LABEL: &'static str = "User info";
    const CODE: &'static str = "USER_INFO";
    const FIELDS: &'static [FieldSpec] = USER_INFO_FIELDS;
    const TIMESTAMPS: Timestamps = Timestamps::CreatedAndUpdated;

    fn id(&self) -> Uuid {
        self.id
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }
}

impl SingletonResource for UserInfo {}

//
// ──────────────────────────────────────────────────────────
// Site settings (singleton)
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub id: Uuid,
    pub site_name: String,
    pub site_description: String,
    pub site_url: String,
    /// JSON-encoded `NewsletterSettings`.
    pub newsletter: Option<String>,
    /// JSON-encoded `ContactFormSettings`.
    pub contact_form: Option<String>,
    /// JSON-encoded `ThemeSettings`.
    pub theme: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
impl Settings {
    pub fn newsletter_settings(&self) -> Result<Option<NewsletterSettings>, serde_json::Error> {
        decode(self.newsletter.as_deref())
    }

    pub fn contact_form_settings(&self) -> Result<Option<ContactFormSettings>, serde_json::Error> {
        decode(self.contact_form.as_deref())
    }

    pub fn theme_settings(&self) -> Result<Option<ThemeSettings>, serde_json::Error> {
        decode(self.theme.as_deref())
    }
}

const SETTINGS_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("siteName", Text),
    FieldSpec::required("siteDescription", Text),
    FieldSpec::required("siteUrl", Text),
    FieldSpec::optional("newsletter", FieldType::Encoded(SubDocument::Newsletter)),
    FieldSpec::optional("contactForm", FieldType::Encoded(SubDocument::ContactForm)),
    FieldSpec::optional("theme", FieldType::Encoded(SubDocument::Theme)),
];

impl Resource for Settings {
    const PATH: &'static str = "settings";
    const LABEL: &'static str = "Settings";
    const CODE: &'static str = "SETTINGS";
    const FIELDS: &'static [FieldSpec] = SETTINGS_FIELDS;
    const TIMESTAMPS: Timestamps = Timestamps::UpdatedOnly;

    fn id(&self) -> Uuid {
        self.id
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }
}

impl SingletonResource for Settings {}

//
// ──────────────────────────────────────────────────────────
// About page (singleton)
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub avatar: String,
    pub location: String,
    pub languages: Option<String>,
    pub title: String,
    pub description: String,
    pub table_of_content_display: bool,
    pub table_of_content_sub_items: bool,
    pub avatar_display: bool,
    pub calendar_display: bool,
    pub calendar_link: Option<String>,
    pub intro_display: bool,
    pub intro_title: String,
    pub intro_description: String,
    pub work_display: bool,
    pub work_title: String,
    pub studies_display: bool,
    pub studies_title: String,
    pub technical_display: bool,
    pub technical_title: String,
}

const ABOUT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("firstName", Text),
    FieldSpec::required("lastName", Text),
    FieldSpec::required("role", Text),
    FieldSpec::required("avatar", Text),
    FieldSpec::required("location", Text),
    FieldSpec::optional("languages", OptionalText),
    FieldSpec::required("title", Text),
    FieldSpec::required("description", Text),
    FieldSpec::defaulted("tableOfContentDisplay", Boolean, DefaultValue::Bool(true)),
    FieldSpec::defaulted("tableOfContentSubItems", Boolean, DefaultValue::Bool(false)),
    FieldSpec::defaulted("avatarDisplay", Boolean, DefaultValue::Bool(true)),
    FieldSpec::defaulted("calendarDisplay", Boolean, DefaultValue::Bool(false)),
    FieldSpec::optional("calendarLink", OptionalText),
    FieldSpec::defaulted("introDisplay", Boolean, DefaultValue::Bool(true)),
    FieldSpec::required("introTitle", Text),
    FieldSpec::required("introDescription", Text),
    FieldSpec::defaulted("workDisplay", Boolean, DefaultValue::Bool(true)),
    FieldSpec::required("workTitle", Text),
    FieldSpec::defaulted("studiesDisplay", Boolean, DefaultValue::Bool(true)),
    FieldSpec::required("studiesTitle", Text),
    FieldSpec::defaulted("technicalDisplay", Boolean, DefaultValue::Bool(true)),
    FieldSpec::required("technicalTitle", Text),
];

impl Resource for About {
    const PATH: &'static str = "about";
    const LABEL: &'static str = "About";
    const CODE: &'static str = "ABOUT";
    const FIELDS: &'static [FieldSpec] = ABOUT_FIELDS;
    const TIMESTAMPS: Timestamps = Timestamps::None;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl SingletonResource for About {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::application::schema::{DefaultValue, Presence};
    use crate::tests::support::fixtures::*;
    use serde::Serialize;

    fn assert_table_consistent<E: Resource>() {
        for field in E::FIELDS {
            match field.presence {
                Presence::Required => {}
                Presence::Defaulted(DefaultValue::Null) => assert!(
                    field.ty.is_nullable(),
                    "{}.{} defaults to null but is not nullable",
                    E::PATH,
                    field.name
                ),
                Presence::Defaulted(_) => assert!(
                    !field.ty.is_nullable(),
                    "{}.{} is nullable and should default to null",
                    E::PATH,
                    field.name
                ),
            }
        }
    }

    fn assert_fields_match_wire_keys<E: Resource + Serialize>(entity: &E) {
        let json = serde_json::to_value(entity).unwrap();
        let object = json.as_object().unwrap();

        for field in E::FIELDS {
            assert!(
                object.contains_key(field.name),
                "{} field table names `{}` but the entity does not serialize it",
                E::PATH,
                field.name
            );
        }

        // Every serialized key is either writable or generated
        let generated = ["id", "createdAt", "updatedAt"];
        for key in object.keys() {
            assert!(
                generated.contains(&key.as_str()) || E::FIELDS.iter().any(|f| f.name == key),
                "{} serializes `{}` which the field table does not declare",
                E::PATH,
                key
            );
        }
    }

    #[test]
    fn field_tables_are_consistent() {
        assert_table_consistent::<Project>();
        assert_table_consistent::<BlogPost>();
        assert_table_consistent::<SocialLink>();
        assert_table_consistent::<WorkExperience>();
        assert_table_consistent::<Education>();
        assert_table_consistent::<Skill>();
        assert_table_consistent::<UserInfo>();
        assert_table_consistent::<Settings>();
        assert_table_consistent::<About>();
    }

    #[test]
    fn field_tables_match_serialized_entities() {
        assert_fields_match_wire_keys(&sample_project("Portfolio", Some(1)));
        assert_fields_match_wire_keys(&sample_blog_post("hello-world"));
        assert_fields_match_wire_keys(&sample_social_link("GitHub", 1));
        assert_fields_match_wire_keys(&sample_work_experience("Acme", 1));
        assert_fields_match_wire_keys(&sample_education("Tech University", 1));
        assert_fields_match_wire_keys(&sample_skill("Rust", 1));
        assert_fields_match_wire_keys(&sample_user_info());
        assert_fields_match_wire_keys(&sample_settings());
        assert_fields_match_wire_keys(&sample_about());
    }

    #[test]
    fn blog_post_slug_is_its_unique_key() {
        let post = sample_blog_post("hello-world");
        assert_eq!(post.unique_keys(), vec![("slug", "hello-world".to_string())]);
    }

    #[test]
    fn settings_decode_encoded_sub_documents() {
        let settings = sample_settings();

        let theme = settings.theme_settings().unwrap().unwrap();
        assert_eq!(theme.color_theme, "dark");

        let newsletter = settings.newsletter_settings().unwrap().unwrap();
        assert!(newsletter.enabled);

        assert!(settings.contact_form_settings().unwrap().is_none());
    }
}
