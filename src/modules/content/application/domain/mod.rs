pub mod entities;
pub mod ordering;
pub mod resource;
pub mod settings;

pub use entities::{
    About, BlogPost, Education, Project, ProjectStatus, Settings, Skill, SocialLink, UserInfo,
    WorkExperience,
};
pub use ordering::{sort_for_listing, OrderingPolicy};
pub use resource::{
    find_unique_conflict, CollectionResource, Resource, SingletonResource, Timestamps,
};
