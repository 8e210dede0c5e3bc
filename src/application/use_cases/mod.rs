mod delete_file;
mod get_file;
mod list_files;
mod patch_file;
mod upload_file;

#[cfg(test)]
mod test_utils;

pub use delete_file::DeleteFileUseCase;
pub use get_file::GetFileUseCase;
pub use list_files::ListFilesUseCase;
pub use patch_file::PatchFileUseCase;
pub use upload_file::UploadFileUseCase;
