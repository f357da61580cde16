//! Post handlers.

use actix_web::{HttpResponse, web};

use babel_core::domain::{NewPost, PageRequest, Post};
use babel_shared::dto::{CreatePostRequest, ListPostsQuery, PostPageResponse, PostResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        text: post.text,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// GET /api/posts?limit=&cursor=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let ListPostsQuery { limit, cursor } = query.into_inner();
    let request = PageRequest::new(limit, cursor)?;

    let page = state.posts.list(&request).await?.map(to_response);

    Ok(HttpResponse::Ok().json(PostPageResponse {
        items: page.items,
        next_cursor: page.next_cursor,
    }))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_by_id(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let CreatePostRequest { id, title, text } = body.into_inner();
    let new_post = NewPost::new(id, title, text)?;

    let post = state.posts.create(new_post).await?;

    Ok(HttpResponse::Created().json(to_response(post)))
}
