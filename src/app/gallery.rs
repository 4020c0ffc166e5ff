use prompt_flow::gallery::GalleryDraft;
use prompt_flow::Control;

use crate::app::api::{ApiError, ApiResult};
use leptos::prelude::*;

use crate::app::state::AppState;
use crate::app::utils::{confirm, read_image};

fn unreadable(err: String) -> ApiError {
    ApiError::Rejected(format!("读取图片失败: {err}"))
}

pub async fn load_gallery(state: AppState) -> ApiResult<()> {
    let list = state.api().gallery().await?;
    state.gallery.update(|g| g.replace_all(list));
    Ok(())
}

pub fn reload_gallery(state: AppState) {
    state.spawn_guarded(Control::LoadGallery, "加载画廊失败", load_gallery(state));
}

pub fn upload(state: AppState, draft: GalleryDraft, file: Option<web_sys::File>) {
    let Some(file) = file else {
        state.error("请选择图片");
        return;
    };
    state.spawn_guarded(Control::SaveGalleryItem, "上传失败", async move {
        let image = read_image(&file).await.map_err(unreadable)?;
        let item = state.api().upload_gallery_item(&draft, image).await?;
        state.gallery.update(|g| g.prepend(item));
        state.close_modal();
        state.success("作品上传成功!");
        Ok(())
    });
}

pub fn update(state: AppState, id: String, draft: GalleryDraft, file: Option<web_sys::File>) {
    state.spawn_guarded(Control::SaveGalleryItem, "更新失败", async move {
        let image = match file {
            Some(file) => Some(read_image(&file).await.map_err(unreadable)?),
            None => None,
        };
        let item = state.api().update_gallery_item(&id, &draft, image).await?;
        state.gallery.update(|g| {
            g.replace(item);
        });
        state.close_modal();
        state.success("作品更新成功!");
        Ok(())
    });
}

pub fn delete(state: AppState, id: String) {
    if !confirm("确定要删除这个作品吗? 此操作不可恢复。") {
        return;
    }
    state.spawn_guarded(Control::DeleteGalleryItem, "删除失败", async move {
        state.api().delete_gallery_item(&id).await?;
        state.gallery.update(|g| {
            g.remove(&id);
        });
        state.close_modal();
        state.success("作品已删除");
        Ok(())
    });
}
