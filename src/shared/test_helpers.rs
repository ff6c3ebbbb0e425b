#[cfg(test)]
pub use fakes::*;

#[cfg(test)]
mod fakes {
    use std::cmp::Ordering;
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{extract::Request, middleware::Next, response::Response, Router};
    use chrono::Utc;

    use crate::core::error::{AppError, Result};
    use crate::features::attachments::models::{Attachment, NewAttachment};
    use crate::features::attachments::repository::{AttachmentRepository, PendingDeletion};
    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::items::dtos::{
        CreateItemDto, ItemSortBy, ListItemsQuery, SortDirection, UpdateItemDto,
    };
    use crate::features::collections::dtos::{CreateCollectionDto, UpdateCollectionDto};
    use crate::features::collections::models::Collection;
    use crate::features::collections::repository::CollectionRepository;
    use crate::features::items::models::Item;
    use crate::features::items::ItemRepository;
    use crate::features::rooms::dtos::{CreateRoomDto, UpdateRoomDto};
    use crate::features::rooms::models::Room;
    use crate::features::rooms::repository::RoomRepository;
    use crate::features::stacks::dtos::{CreateStackDto, ListStacksQuery, UpdateStackDto};
    use crate::features::stacks::models::Stack;
    use crate::features::stacks::repository::StackRepository;
    use crate::features::tags::dtos::{CreateTagDto, UpdateTagDto};
    use crate::features::tags::models::{ItemTag, Tag};
    use crate::features::tags::repository::TagRepository;
    use crate::shared::types::PaginationQuery;

    pub fn test_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "test-sub".to_string(),
            email: Some("tester@example.com".to_string()),
            name: Some("Test User".to_string()),
            preferred_username: Some("tester".to_string()),
        }
    }

    async fn inject_test_user_middleware(mut request: Request, next: Next) -> Response {
        request.extensions_mut().insert(test_user());
        next.run(request).await
    }

    /// Stand-in for the JWT layer: every request is made as `test_user()`
    pub fn with_test_user(router: Router) -> Router {
        router.layer(axum::middleware::from_fn(inject_test_user_middleware))
    }

    #[derive(Default)]
    struct Tables {
        items: BTreeMap<i64, Item>,
        attachments: BTreeMap<i64, Attachment>,
        collections: BTreeMap<i64, Collection>,
        rooms: BTreeMap<i64, Room>,
        stacks: BTreeMap<i64, Stack>,
        tags: BTreeMap<i64, Tag>,
        /// (item_id, tag_id)
        item_tags: BTreeSet<(i64, i64)>,
        next_item_id: i64,
        next_attachment_id: i64,
        next_collection_id: i64,
        next_room_id: i64,
        next_stack_id: i64,
        next_tag_id: i64,
    }

    impl Tables {
        fn check_placement(&self, collection_id: Option<i64>, stack_id: Option<i64>) -> Result<()> {
            if collection_id.is_some_and(|id| !self.collections.contains_key(&id)) {
                return Err(AppError::Validation("Collection not found".to_string()));
            }
            if stack_id.is_some_and(|id| !self.stacks.contains_key(&id)) {
                return Err(AppError::Validation("Stack not found".to_string()));
            }
            Ok(())
        }

        fn check_room(&self, room_id: Option<i64>) -> Result<()> {
            if room_id.is_some_and(|id| !self.rooms.contains_key(&id)) {
                return Err(AppError::Validation("Room not found".to_string()));
            }
            Ok(())
        }

        fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
            self.tags
                .values()
                .any(|t| t.name == name && Some(t.id) != except)
        }

        fn with_item_count(&self, tag: &Tag) -> Tag {
            let item_count = self
                .item_tags
                .iter()
                .filter(|(_, tag_id)| *tag_id == tag.id)
                .count() as i64;
            Tag {
                item_count,
                ..tag.clone()
            }
        }

        fn item_sort_key(&self, item: &Item, sort_by: ItemSortBy) -> Option<String> {
            match sort_by {
                ItemSortBy::Collection => item
                    .collection_id
                    .and_then(|id| self.collections.get(&id))
                    .map(|c| c.title.clone()),
                ItemSortBy::Stack => item
                    .stack_id
                    .and_then(|id| self.stacks.get(&id))
                    .map(|s| s.title.clone()),
                _ => None,
            }
        }
    }

    fn directed(ordering: Ordering, order: SortDirection) -> Ordering {
        match order {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Postgres `NULLS LAST`: missing values trail in either direction
    fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>, order: SortDirection) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => directed(a.cmp(b), order),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
        }
    }

    fn paginate<T>(rows: Vec<T>, offset: i64, limit: i64) -> (Vec<T>, i64) {
        let total = rows.len() as i64;
        let page = rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        (page, total)
    }

    /// Every table held in memory, with the foreign keys between them
    /// enforced the way the migrations declare them
    #[derive(Default, Clone)]
    pub struct InMemoryRepository {
        tables: Arc<Mutex<Tables>>,
    }

    impl InMemoryRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn seed_item(&self, title: &str) -> i64 {
            let mut tables = self.tables.lock().unwrap();
            tables.next_item_id += 1;
            let id = tables.next_item_id;
            let now = Utc::now();
            tables.items.insert(
                id,
                Item {
                    id,
                    title: title.to_string(),
                    description: None,
                    collection_id: None,
                    stack_id: None,
                    shelf: None,
                    slot: None,
                    created_at: now,
                    updated_at: now,
                },
            );
            id
        }

        /// Set an item's collection and stack directly, skipping reference checks
        pub fn place_item(&self, item_id: i64, collection_id: Option<i64>, stack_id: Option<i64>) {
            let mut tables = self.tables.lock().unwrap();
            if let Some(item) = tables.items.get_mut(&item_id) {
                item.collection_id = collection_id;
                item.stack_id = stack_id;
            }
        }

        pub fn seed_room(&self, title: &str) -> i64 {
            let mut tables = self.tables.lock().unwrap();
            tables.next_room_id += 1;
            let id = tables.next_room_id;
            let now = Utc::now();
            tables.rooms.insert(
                id,
                Room {
                    id,
                    title: title.to_string(),
                    annotations: None,
                    created_at: now,
                    updated_at: now,
                },
            );
            id
        }

        pub fn seed_stack(&self, title: &str, room_id: Option<i64>) -> i64 {
            let mut tables = self.tables.lock().unwrap();
            tables.next_stack_id += 1;
            let id = tables.next_stack_id;
            let now = Utc::now();
            tables.stacks.insert(
                id,
                Stack {
                    id,
                    title: title.to_string(),
                    room_id,
                    annotations: None,
                    created_at: now,
                    updated_at: now,
                },
            );
            id
        }

        /// Insert an attachment row directly, with no blob behind it
        pub fn seed_attachment(
            &self,
            item_id: i64,
            filename: &str,
            checksum_sha256: Option<String>,
        ) -> i64 {
            let mut tables = self.tables.lock().unwrap();
            tables.next_attachment_id += 1;
            let id = tables.next_attachment_id;
            tables.attachments.insert(
                id,
                Attachment {
                    id,
                    item_id,
                    filename: filename.to_string(),
                    content_type: "application/octet-stream".to_string(),
                    filesize: 0,
                    checksum_sha256,
                    created_at: Utc::now(),
                },
            );
            id
        }

        pub fn attachment_count(&self) -> usize {
            self.tables.lock().unwrap().attachments.len()
        }
    }

    #[async_trait]
    impl ItemRepository for InMemoryRepository {
        async fn find(&self, id: i64) -> Result<Option<Item>> {
            Ok(self.tables.lock().unwrap().items.get(&id).cloned())
        }

        async fn list(&self, query: &ListItemsQuery) -> Result<(Vec<Item>, i64)> {
            let tables = self.tables.lock().unwrap();
            let mut items: Vec<Item> = tables
                .items
                .values()
                .filter(|i| query.collection_id.is_none() || i.collection_id == query.collection_id)
                .filter(|i| query.stack_id.is_none() || i.stack_id == query.stack_id)
                .filter(|i| {
                    query
                        .tag_ids
                        .iter()
                        .all(|tag_id| tables.item_tags.contains(&(i.id, *tag_id)))
                })
                .cloned()
                .collect();

            let order = query.order;
            items.sort_by(|a, b| {
                let ordering = match query.sort_by {
                    ItemSortBy::CreatedAt => directed(a.created_at.cmp(&b.created_at), order),
                    ItemSortBy::UpdatedAt => directed(a.updated_at.cmp(&b.updated_at), order),
                    ItemSortBy::Title => directed(a.title.cmp(&b.title), order),
                    ItemSortBy::Id => Ordering::Equal,
                    ItemSortBy::Collection => nulls_last(
                        &tables.item_sort_key(a, ItemSortBy::Collection),
                        &tables.item_sort_key(b, ItemSortBy::Collection),
                        order,
                    ),
                    ItemSortBy::Stack => nulls_last(
                        &tables.item_sort_key(a, ItemSortBy::Stack),
                        &tables.item_sort_key(b, ItemSortBy::Stack),
                        order,
                    )
                    .then(nulls_last(&a.shelf, &b.shelf, order))
                    .then(nulls_last(&a.slot, &b.slot, order)),
                };
                ordering.then(directed(a.id.cmp(&b.id), order))
            });

            Ok(paginate(items, query.offset(), query.limit()))
        }

        async fn insert(&self, dto: &CreateItemDto) -> Result<Item> {
            self.tables
                .lock()
                .unwrap()
                .check_placement(dto.collection_id, dto.stack_id)?;

            let id = self.seed_item(&dto.title);
            let mut tables = self.tables.lock().unwrap();
            let item = tables
                .items
                .get_mut(&id)
                .ok_or_else(|| AppError::Internal("seeded item vanished".to_string()))?;
            item.description = dto.description.clone();
            item.collection_id = dto.collection_id;
            item.stack_id = dto.stack_id;
            item.shelf = dto.shelf;
            item.slot = dto.slot;
            Ok(item.clone())
        }

        async fn update(&self, id: i64, dto: &UpdateItemDto) -> Result<Option<Item>> {
            let mut tables = self.tables.lock().unwrap();
            if !tables.items.contains_key(&id) {
                return Ok(None);
            }
            tables.check_placement(dto.collection_id.flatten(), dto.stack_id.flatten())?;

            let Some(item) = tables.items.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(title) = &dto.title {
                item.title = title.clone();
            }
            if let Some(description) = &dto.description {
                item.description = Some(description.clone());
            }
            if let Some(collection_id) = dto.collection_id {
                item.collection_id = collection_id;
            }
            if let Some(stack_id) = dto.stack_id {
                item.stack_id = stack_id;
            }
            if let Some(shelf) = dto.shelf {
                item.shelf = shelf;
            }
            if let Some(slot) = dto.slot {
                item.slot = slot;
            }
            item.updated_at = Utc::now();
            Ok(Some(item.clone()))
        }

        async fn delete(&self, id: i64) -> Result<bool> {
            let mut tables = self.tables.lock().unwrap();
            if tables.attachments.values().any(|a| a.item_id == id) {
                return Err(AppError::Conflict(
                    "Item has attachments; delete them first".to_string(),
                ));
            }
            tables.item_tags.retain(|(item_id, _)| *item_id != id);
            Ok(tables.items.remove(&id).is_some())
        }
    }

    #[async_trait]
    impl CollectionRepository for InMemoryRepository {
        async fn find(&self, id: i64) -> Result<Option<Collection>> {
            Ok(self.tables.lock().unwrap().collections.get(&id).cloned())
        }

        async fn list(&self, query: &PaginationQuery) -> Result<(Vec<Collection>, i64)> {
            let tables = self.tables.lock().unwrap();
            let rows: Vec<_> = tables.collections.values().cloned().collect();
            Ok(paginate(rows, query.offset(), query.limit()))
        }

        async fn insert(&self, dto: &CreateCollectionDto) -> Result<Collection> {
            let mut tables = self.tables.lock().unwrap();
            tables.next_collection_id += 1;
            let now = Utc::now();
            let collection = Collection {
                id: tables.next_collection_id,
                title: dto.title.clone(),
                annotations: dto.annotations.clone(),
                created_at: now,
                updated_at: now,
            };
            tables.collections.insert(collection.id, collection.clone());
            Ok(collection)
        }

        async fn update(&self, id: i64, dto: &UpdateCollectionDto) -> Result<Option<Collection>> {
            let mut tables = self.tables.lock().unwrap();
            let Some(collection) = tables.collections.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(title) = &dto.title {
                collection.title = title.clone();
            }
            if let Some(annotations) = &dto.annotations {
                collection.annotations = Some(annotations.clone());
            }
            collection.updated_at = Utc::now();
            Ok(Some(collection.clone()))
        }

        async fn delete(&self, id: i64) -> Result<bool> {
            let mut tables = self.tables.lock().unwrap();
            if tables.collections.remove(&id).is_none() {
                return Ok(false);
            }
            for item in tables.items.values_mut() {
                if item.collection_id == Some(id) {
                    item.collection_id = None;
                }
            }
            Ok(true)
        }
    }

    #[async_trait]
    impl RoomRepository for InMemoryRepository {
        async fn find(&self, id: i64) -> Result<Option<Room>> {
            Ok(self.tables.lock().unwrap().rooms.get(&id).cloned())
        }

        async fn list(&self, query: &PaginationQuery) -> Result<(Vec<Room>, i64)> {
            let tables = self.tables.lock().unwrap();
            let rows: Vec<_> = tables.rooms.values().cloned().collect();
            Ok(paginate(rows, query.offset(), query.limit()))
        }

        async fn insert(&self, dto: &CreateRoomDto) -> Result<Room> {
            let id = self.seed_room(&dto.title);
            let mut tables = self.tables.lock().unwrap();
            let room = tables
                .rooms
                .get_mut(&id)
                .ok_or_else(|| AppError::Internal("seeded room vanished".to_string()))?;
            room.annotations = dto.annotations.clone();
            Ok(room.clone())
        }

        async fn update(&self, id: i64, dto: &UpdateRoomDto) -> Result<Option<Room>> {
            let mut tables = self.tables.lock().unwrap();
            let Some(room) = tables.rooms.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(title) = &dto.title {
                room.title = title.clone();
            }
            if let Some(annotations) = &dto.annotations {
                room.annotations = Some(annotations.clone());
            }
            room.updated_at = Utc::now();
            Ok(Some(room.clone()))
        }

        async fn delete(&self, id: i64) -> Result<bool> {
            let mut tables = self.tables.lock().unwrap();
            if tables.rooms.remove(&id).is_none() {
                return Ok(false);
            }
            for stack in tables.stacks.values_mut() {
                if stack.room_id == Some(id) {
                    stack.room_id = None;
                }
            }
            Ok(true)
        }
    }

    #[async_trait]
    impl StackRepository for InMemoryRepository {
        async fn find(&self, id: i64) -> Result<Option<Stack>> {
            Ok(self.tables.lock().unwrap().stacks.get(&id).cloned())
        }

        async fn list(&self, query: &ListStacksQuery) -> Result<(Vec<Stack>, i64)> {
            let tables = self.tables.lock().unwrap();
            let rows: Vec<_> = tables
                .stacks
                .values()
                .filter(|s| query.room_id.is_none() || s.room_id == query.room_id)
                .cloned()
                .collect();
            let page = query.pagination();
            Ok(paginate(rows, page.offset(), page.limit()))
        }

        async fn insert(&self, dto: &CreateStackDto) -> Result<Stack> {
            self.tables.lock().unwrap().check_room(dto.room_id)?;

            let id = self.seed_stack(&dto.title, dto.room_id);
            let mut tables = self.tables.lock().unwrap();
            let stack = tables
                .stacks
                .get_mut(&id)
                .ok_or_else(|| AppError::Internal("seeded stack vanished".to_string()))?;
            stack.annotations = dto.annotations.clone();
            Ok(stack.clone())
        }

        async fn update(&self, id: i64, dto: &UpdateStackDto) -> Result<Option<Stack>> {
            let mut tables = self.tables.lock().unwrap();
            if !tables.stacks.contains_key(&id) {
                return Ok(None);
            }
            tables.check_room(dto.room_id.flatten())?;

            let Some(stack) = tables.stacks.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(title) = &dto.title {
                stack.title = title.clone();
            }
            if let Some(room_id) = dto.room_id {
                stack.room_id = room_id;
            }
            if let Some(annotations) = &dto.annotations {
                stack.annotations = Some(annotations.clone());
            }
            stack.updated_at = Utc::now();
            Ok(Some(stack.clone()))
        }

        async fn delete(&self, id: i64) -> Result<bool> {
            let mut tables = self.tables.lock().unwrap();
            if tables.stacks.remove(&id).is_none() {
                return Ok(false);
            }
            for item in tables.items.values_mut() {
                if item.stack_id == Some(id) {
                    item.stack_id = None;
                }
            }
            Ok(true)
        }
    }

    #[async_trait]
    impl TagRepository for InMemoryRepository {
        async fn find(&self, id: i64) -> Result<Option<Tag>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables.tags.get(&id).map(|t| tables.with_item_count(t)))
        }

        async fn list(&self, query: &PaginationQuery) -> Result<(Vec<Tag>, i64)> {
            let tables = self.tables.lock().unwrap();
            let mut rows: Vec<Tag> = tables
                .tags
                .values()
                .map(|t| tables.with_item_count(t))
                .collect();
            rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            Ok(paginate(rows, query.offset(), query.limit()))
        }

        async fn insert(&self, dto: &CreateTagDto) -> Result<Tag> {
            let mut tables = self.tables.lock().unwrap();
            if tables.name_taken(&dto.name, None) {
                return Err(AppError::Conflict("Tag already exists".to_string()));
            }
            tables.next_tag_id += 1;
            let now = Utc::now();
            let tag = Tag {
                id: tables.next_tag_id,
                name: dto.name.clone(),
                description: dto.description.clone(),
                item_count: 0,
                created_at: now,
                updated_at: now,
            };
            tables.tags.insert(tag.id, tag.clone());
            Ok(tag)
        }

        async fn update(&self, id: i64, dto: &UpdateTagDto) -> Result<Option<Tag>> {
            let mut tables = self.tables.lock().unwrap();
            if !tables.tags.contains_key(&id) {
                return Ok(None);
            }
            if let Some(name) = &dto.name {
                if tables.name_taken(name, Some(id)) {
                    return Err(AppError::Conflict("Tag already exists".to_string()));
                }
            }

            let Some(tag) = tables.tags.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(name) = &dto.name {
                tag.name = name.clone();
            }
            if let Some(description) = &dto.description {
                tag.description = Some(description.clone());
            }
            tag.updated_at = Utc::now();
            let tag = tag.clone();
            Ok(Some(tables.with_item_count(&tag)))
        }

        async fn delete(&self, id: i64) -> Result<bool> {
            let mut tables = self.tables.lock().unwrap();
            tables.item_tags.retain(|(_, tag_id)| *tag_id != id);
            Ok(tables.tags.remove(&id).is_some())
        }

        async fn link(&self, item_id: i64, tag_id: i64) -> Result<()> {
            self.tables
                .lock()
                .unwrap()
                .item_tags
                .insert((item_id, tag_id));
            Ok(())
        }

        async fn unlink(&self, item_id: i64, tag_id: i64) -> Result<()> {
            self.tables
                .lock()
                .unwrap()
                .item_tags
                .remove(&(item_id, tag_id));
            Ok(())
        }

        async fn tags_for_items(&self, item_ids: &[i64]) -> Result<Vec<ItemTag>> {
            let tables = self.tables.lock().unwrap();
            let mut links: Vec<ItemTag> = tables
                .item_tags
                .iter()
                .filter(|(item_id, _)| item_ids.contains(item_id))
                .filter_map(|(item_id, tag_id)| {
                    tables.tags.get(tag_id).map(|t| ItemTag {
                        item_id: *item_id,
                        tag_id: t.id,
                        name: t.name.clone(),
                    })
                })
                .collect();
            links.sort_by(|a, b| a.name.cmp(&b.name).then(a.tag_id.cmp(&b.tag_id)));
            Ok(links)
        }
    }

    #[async_trait]
    impl AttachmentRepository for InMemoryRepository {
        async fn insert(&self, new: &NewAttachment) -> Result<Attachment> {
            let mut tables = self.tables.lock().unwrap();
            if !tables.items.contains_key(&new.item_id) {
                return Err(AppError::NotFound("Item not found".to_string()));
            }
            tables.next_attachment_id += 1;
            let attachment = Attachment {
                id: tables.next_attachment_id,
                item_id: new.item_id,
                filename: new.filename.clone(),
                content_type: new.content_type.clone(),
                filesize: new.filesize,
                checksum_sha256: None,
                created_at: Utc::now(),
            };
            tables.attachments.insert(attachment.id, attachment.clone());
            Ok(attachment)
        }

        async fn set_checksum(&self, id: i64, checksum: &str) -> Result<Attachment> {
            let mut tables = self.tables.lock().unwrap();
            let attachment = tables
                .attachments
                .get_mut(&id)
                .ok_or_else(|| AppError::NotFound("Attachment not found".to_string()))?;
            attachment.checksum_sha256 = Some(checksum.to_string());
            Ok(attachment.clone())
        }

        async fn find_for_item(
            &self,
            item_id: i64,
            attachment_id: i64,
        ) -> Result<Option<Attachment>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .attachments
                .get(&attachment_id)
                .filter(|a| a.item_id == item_id)
                .cloned())
        }

        async fn list_for_item(&self, item_id: i64) -> Result<Vec<Attachment>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .attachments
                .values()
                .filter(|a| a.item_id == item_id)
                .cloned()
                .collect())
        }

        async fn begin_delete(&self, attachment_id: i64) -> Result<Box<dyn PendingDeletion>> {
            if !self
                .tables
                .lock()
                .unwrap()
                .attachments
                .contains_key(&attachment_id)
            {
                return Err(AppError::NotFound("Attachment not found".to_string()));
            }
            Ok(Box::new(InMemoryPendingDeletion {
                tables: Arc::clone(&self.tables),
                attachment_id,
            }))
        }
    }

    /// Applies the row removal only on commit; dropping it is a rollback
    struct InMemoryPendingDeletion {
        tables: Arc<Mutex<Tables>>,
        attachment_id: i64,
    }

    #[async_trait]
    impl PendingDeletion for InMemoryPendingDeletion {
        async fn commit(self: Box<Self>) -> Result<()> {
            self.tables
                .lock()
                .unwrap()
                .attachments
                .remove(&self.attachment_id);
            Ok(())
        }
    }
}
