#![allow(dead_code)]
use rand::{seq::SliceRandom, Rng};

use keyset_cursor::*;

#[derive(Debug, Clone, PartialEq)]
pub enum PostField {
    Title(String),
    Id(i64),
}

impl CursorField for PostField {
    fn key(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Id(_) => "id",
        }
    }

    fn to_scalar(&self) -> CursorScalar {
        match self {
            Self::Title(title) => CursorScalar::from(title.as_str()),
            Self::Id(id) => CursorScalar::Integer(*id),
        }
    }

    fn from_entry(key: &str, value: CursorScalar) -> Result<Self, CursorFieldError> {
        match key {
            "title" => match value {
                CursorScalar::Text(title) => Ok(Self::Title(title)),
                other => Err(CursorFieldError::invalid_type(key, "text", &other)),
            },
            "id" => match value {
                CursorScalar::Integer(id) => Ok(Self::Id(id)),
                other => Err(CursorFieldError::invalid_type(key, "integer", &other)),
            },
            _ => Err(CursorFieldError::UnknownKey(key.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostScope {
    AuthorId(i64),
}

impl CursorField for PostScope {
    fn key(&self) -> &'static str {
        "authorId"
    }

    fn to_scalar(&self) -> CursorScalar {
        match self {
            Self::AuthorId(id) => CursorScalar::Integer(*id),
        }
    }

    fn from_entry(key: &str, value: CursorScalar) -> Result<Self, CursorFieldError> {
        match (key, value) {
            ("authorId", CursorScalar::Integer(id)) => Ok(Self::AuthorId(id)),
            ("authorId", other) => Err(CursorFieldError::invalid_type(key, "integer", &other)),
            _ => Err(CursorFieldError::UnknownKey(key.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserField {
    Name(String),
    Email(String),
    Id(i64),
}

impl CursorField for UserField {
    fn key(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Email(_) => "email",
            Self::Id(_) => "id",
        }
    }

    fn to_scalar(&self) -> CursorScalar {
        match self {
            Self::Name(v) | Self::Email(v) => CursorScalar::from(v.as_str()),
            Self::Id(id) => CursorScalar::Integer(*id),
        }
    }

    fn from_entry(key: &str, value: CursorScalar) -> Result<Self, CursorFieldError> {
        match (key, value) {
            ("name", CursorScalar::Text(v)) => Ok(Self::Name(v)),
            ("email", CursorScalar::Text(v)) => Ok(Self::Email(v)),
            ("id", CursorScalar::Integer(id)) => Ok(Self::Id(id)),
            ("name" | "email", other) => Err(CursorFieldError::invalid_type(key, "text", &other)),
            ("id", other) => Err(CursorFieldError::invalid_type(key, "integer", &other)),
            _ => Err(CursorFieldError::UnknownKey(key.to_string())),
        }
    }
}

pub struct Posts;
impl PaginationKind for Posts {
    const NAME: &'static str = "post";
    type Field = PostField;
    type Context = Unpinned;
}

pub struct UserPosts;
impl PaginationKind for UserPosts {
    const NAME: &'static str = "userPost";
    type Field = PostField;
    type Context = PostScope;
}

pub struct Users;
impl PaginationKind for Users {
    const NAME: &'static str = "user";
    type Field = UserField;
    type Context = Unpinned;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
}

impl Record for Post {
    fn scalar(&self, key: &str) -> Option<CursorScalar> {
        match key {
            "id" => Some(CursorScalar::Integer(self.id)),
            "title" => Some(CursorScalar::from(self.title.as_str())),
            "authorId" => Some(CursorScalar::Integer(self.author_id)),
            _ => None,
        }
    }
}

fn post_field(post: &Post, key: &str) -> Option<PostField> {
    match key {
        "id" => Some(PostField::Id(post.id)),
        "title" => Some(PostField::Title(post.title.clone())),
        _ => None,
    }
}

impl CursorSource<Posts> for Post {
    fn cursor_field(&self, key: &str) -> Option<PostField> {
        post_field(self, key)
    }
}

impl CursorSource<UserPosts> for Post {
    fn cursor_field(&self, key: &str) -> Option<PostField> {
        post_field(self, key)
    }
}

pub fn post_registry() -> SortRegistry {
    SortRegistry::new()
        .with("id", SortSpec::new(vec![SortKey::asc("id")]).unwrap())
        .with(
            "title",
            SortSpec::new(vec![SortKey::asc("title"), SortKey::asc("id")]).unwrap(),
        )
        .with(
            "newest",
            SortSpec::new(vec![SortKey::desc("title"), SortKey::desc("id")]).unwrap(),
        )
}

pub fn user_registry() -> SortRegistry {
    SortRegistry::new()
        .with("id", SortSpec::new(vec![SortKey::asc("id")]).unwrap())
        .with(
            "name",
            SortSpec::new(vec![SortKey::asc("name"), SortKey::asc("id")]).unwrap(),
        )
}

/// Posts with heavily duplicated titles, in random storage order.
pub fn test_posts(count: i64) -> Vec<Post> {
    const TITLES: [&str; 4] = ["alpha", "bravo", "charlie", "delta"];
    let mut rng = rand::rng();
    let mut posts: Vec<_> = (1..=count)
        .map(|id| Post {
            id,
            title: TITLES[rng.random_range(0..TITLES.len())].to_string(),
            author_id: rng.random_range(1..=3),
        })
        .collect();
    posts.shuffle(&mut rng);
    posts
}

pub fn sorted_ids(posts: &[Post], keys: &[SortKey], author_id: Option<i64>) -> Vec<i64> {
    let mut posts: Vec<_> = posts
        .iter()
        .filter(|post| author_id.is_none_or(|author_id| post.author_id == author_id))
        .collect();
    posts.sort_by(|a, b| {
        keys.iter()
            .map(|SortKey { key, direction }| {
                let ordering = a
                    .scalar(key)
                    .partial_cmp(&b.scalar(key))
                    .expect("comparable");
                if direction.is_ascending() {
                    ordering
                } else {
                    ordering.reverse()
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    posts.into_iter().map(|post| post.id).collect()
}

pub fn fetch<K>(
    paginator: &Paginator<'_>,
    executor: &InMemoryExecutor<Post>,
    args: &PaginationArgs,
    scope: &[K::Context],
) -> anyhow::Result<Connection<Post>>
where
    K: PaginationKind,
    Post: CursorSource<K>,
{
    let plan = paginator.plan::<K>(args, scope)?;
    let rows = executor.fetch(&plan.page_query())?;
    Ok(plan.connection(rows)?)
}
