use {
    crate::{
        basis::Placement,
        client::{MegaverseClient, Transport},
    },
    log::info,
};

/// 生成順に一つずつ配置する. 個々の失敗はクライアントがログに残すので, ここでは止めない.
pub fn place_all<T: Transport>(client: &MegaverseClient<T>, placements: &[Placement]) {
    info!("placing {} entities", placements.len());
    for placement in placements {
        client.place(placement);
    }
}

/// `placements` と同じ順に削除する.
pub fn clear_all<T: Transport>(client: &MegaverseClient<T>, placements: &[Placement]) {
    info!("removing {} entities", placements.len());
    for placement in placements {
        client.remove(placement.entity.kind(), placement.pos);
    }
}
