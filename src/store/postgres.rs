use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::QueryableByName;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    auth::user::{AdminUser, AdminUserInsertable},
    blog::post::{NewPost, Post, PostInsertable, PostPatch, PostRow},
    subscriber::{EmailSubscriberInsertable, NewEmailSubscriber, SubscribeOutcome},
};
use crate::schema::{admin_users, email_subscribers, posts};

use super::{
    PostFilter, PostQuery, PostSortField, PostStore, SortDirection, SubscriberStore, UserStore,
};

pub type PgPool = Pool<AsyncPgConnection>;

/// Pool sized from the physical core count.
pub async fn build_pool(db_url: String) -> anyhow::Result<PgPool> {
    let num_cores: u32 = num_cpus::get_physical() as u32;

    let pool_config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(db_url);

    let pool = Pool::builder()
        .min_idle(Some(num_cores))
        .max_size(num_cores * 10u32)
        .build(pool_config)
        .await?;

    let mut conn = pool.get().await?;

    #[derive(QueryableByName)]
    struct PgVersion {
        #[diesel(sql_type = diesel::sql_types::Text)]
        version: String,
    }

    let pg_version: PgVersion = diesel::sql_query("SELECT version()")
        .get_result(&mut conn)
        .await?;

    info!(version = %pg_version.version, "Connected to PostgreSQL.");

    drop(conn);
    Ok(pool)
}

async fn get_conn(pool: &PgPool) -> anyhow::Result<PooledConnection<'_, AsyncPgConnection>> {
    Ok(pool.get().await?)
}

fn filtered(filter: PostFilter) -> posts::BoxedQuery<'static, Pg> {
    let mut query = posts::table.into_boxed();
    if let Some(status) = filter.status {
        query = query.filter(posts::post_status.eq(status.as_str()));
    }
    query
}

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn count_posts(&self, filter: PostFilter) -> anyhow::Result<u64> {
        let mut conn = get_conn(&self.pool).await?;

        let count: i64 = filtered(filter).count().get_result(&mut conn).await?;

        Ok(u64::try_from(count)?)
    }

    async fn find_posts(&self, query: PostQuery) -> anyhow::Result<Vec<Post>> {
        let mut conn = get_conn(&self.pool).await?;

        let sorted = match (query.sort.field, query.sort.direction) {
            (PostSortField::CreatedAt, SortDirection::Ascending) => {
                filtered(query.filter).order(posts::post_created_at.asc())
            }
            (PostSortField::CreatedAt, SortDirection::Descending) => {
                filtered(query.filter).order(posts::post_created_at.desc())
            }
            (PostSortField::UpdatedAt, SortDirection::Ascending) => {
                filtered(query.filter).order(posts::post_updated_at.asc())
            }
            (PostSortField::UpdatedAt, SortDirection::Descending) => {
                filtered(query.filter).order(posts::post_updated_at.desc())
            }
            (PostSortField::Title, SortDirection::Ascending) => {
                filtered(query.filter).order(posts::post_title.asc())
            }
            (PostSortField::Title, SortDirection::Descending) => {
                filtered(query.filter).order(posts::post_title.desc())
            }
        };

        let rows: Vec<PostRow> = sorted
            .then_order_by(posts::post_id.asc())
            .offset(i64::try_from(query.skip).unwrap_or(i64::MAX))
            .limit(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .select(PostRow::as_select())
            .load(&mut conn)
            .await?;

        drop(conn);

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn get_post(&self, post_id: Uuid) -> anyhow::Result<Option<Post>> {
        let mut conn = get_conn(&self.pool).await?;

        let row: Option<PostRow> = posts::table
            .find(post_id)
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        row.map(Post::try_from).transpose()
    }

    async fn insert_post(&self, new_post: NewPost) -> anyhow::Result<Post> {
        let post = new_post.into_post(Uuid::new_v4(), Utc::now());
        let mut conn = get_conn(&self.pool).await?;

        diesel::insert_into(posts::table)
            .values(PostInsertable::from_post(&post))
            .execute(&mut conn)
            .await?;

        Ok(post)
    }

    async fn update_post(&self, post_id: Uuid, patch: PostPatch) -> anyhow::Result<Option<Post>> {
        let mut conn = get_conn(&self.pool).await?;

        let row: Option<PostRow> = diesel::update(posts::table.find(post_id))
            .set((
                posts::post_title.eq(patch.post_title),
                posts::post_snippet.eq(patch.post_snippet),
                posts::post_body.eq(patch.post_body),
                posts::post_status.eq(patch.post_status.as_str()),
                posts::post_author.eq(patch.post_author),
                posts::post_featured_image.eq(patch.post_featured_image),
                posts::post_tags.eq(patch.post_tags),
                posts::post_updated_at.eq(Utc::now()),
            ))
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?;

        row.map(Post::try_from).transpose()
    }

    async fn delete_post(&self, post_id: Uuid) -> anyhow::Result<bool> {
        let mut conn = get_conn(&self.pool).await?;

        let deleted = diesel::delete(posts::table.find(post_id))
            .execute(&mut conn)
            .await?;

        Ok(deleted > 0)
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_user_by_name(&self, user_name: &str) -> anyhow::Result<Option<AdminUser>> {
        let mut conn = get_conn(&self.pool).await?;

        Ok(admin_users::table
            .filter(admin_users::user_name.eq(user_name))
            .select(AdminUser::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> anyhow::Result<Option<AdminUser>> {
        let mut conn = get_conn(&self.pool).await?;

        Ok(admin_users::table
            .find(user_id)
            .select(AdminUser::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn upsert_user(
        &self,
        user_name: &str,
        user_password_hash: &str,
    ) -> anyhow::Result<AdminUser> {
        let user_id = Uuid::new_v4();
        let mut conn = get_conn(&self.pool).await?;

        Ok(diesel::insert_into(admin_users::table)
            .values(AdminUserInsertable::new(
                &user_id,
                user_name,
                user_password_hash,
            ))
            .on_conflict(admin_users::user_name)
            .do_update()
            .set(admin_users::user_password_hash.eq(user_password_hash))
            .returning(AdminUser::as_returning())
            .get_result(&mut conn)
            .await?)
    }
}

#[derive(Clone)]
pub struct PgSubscriberStore {
    pool: PgPool,
}

impl PgSubscriberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberStore for PgSubscriberStore {
    async fn insert_subscriber(
        &self,
        subscriber: NewEmailSubscriber,
    ) -> anyhow::Result<SubscribeOutcome> {
        let subscriber = subscriber.into_subscriber(Uuid::new_v4(), Utc::now());
        let mut conn = get_conn(&self.pool).await?;

        let inserted = diesel::insert_into(email_subscribers::table)
            .values(EmailSubscriberInsertable::from_subscriber(&subscriber))
            .on_conflict(email_subscribers::subscriber_email)
            .do_nothing()
            .execute(&mut conn)
            .await?;

        Ok(if inserted == 0 {
            SubscribeOutcome::AlreadySubscribed
        } else {
            SubscribeOutcome::Subscribed(subscriber)
        })
    }
}
