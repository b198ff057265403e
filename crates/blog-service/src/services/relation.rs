//! Add/remove/check for soft-deletable relations
//!
//! Shared by likes, bookmarks, user follows and topic follows.

use blog_core::entities::RelationTransition;
use blog_core::traits::RelationRepository;
use blog_core::DomainError;

use super::error::ServiceResult;

/// Make the pair active: create it, or restore a removed row.
/// Fails with `already_active` if it is active already.
pub(super) async fn activate<R, S, T>(
    repo: &R,
    subject: S,
    target: T,
    already_active: DomainError,
) -> ServiceResult<()>
where
    R: RelationRepository<S, T> + ?Sized,
    S: Copy + Send + Sync + 'static,
    T: Copy + Send + Sync + 'static,
{
    let existing = repo.find(subject, target).await?;
    match RelationTransition::for_existing(existing.as_ref()) {
        RelationTransition::Create => {
            repo.create(subject, target).await?;
        }
        RelationTransition::Restore => repo.restore(subject, target).await?,
        RelationTransition::AlreadyActive => return Err(already_active.into()),
    }
    Ok(())
}

/// Remove an active pair; fails with `not_active` otherwise
pub(super) async fn deactivate<R, S, T>(
    repo: &R,
    subject: S,
    target: T,
    not_active: DomainError,
) -> ServiceResult<()>
where
    R: RelationRepository<S, T> + ?Sized,
    S: Copy + Send + Sync + 'static,
    T: Copy + Send + Sync + 'static,
{
    if repo.remove(subject, target).await? {
        Ok(())
    } else {
        Err(not_active.into())
    }
}

pub(super) async fn is_active<R, S, T>(repo: &R, subject: S, target: T) -> ServiceResult<bool>
where
    R: RelationRepository<S, T> + ?Sized,
    S: Copy + Send + Sync + 'static,
    T: Copy + Send + Sync + 'static,
{
    Ok(repo
        .find(subject, target)
        .await?
        .is_some_and(|relation| relation.is_active()))
}
