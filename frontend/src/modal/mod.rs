pub mod yw_material_modal;
