pub mod badges;
pub mod details_list;
pub mod episode_sheet;
pub mod fab;
pub mod header;
pub mod toast;
pub mod toolbar;
