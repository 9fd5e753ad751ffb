//! A wrapper type providing direct memory access to symbol files.
//!
//! See the [`ByteView`] struct for more documentation.

use std::borrow::Cow;
use std::fs::File;
use std::io;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use memmap2::Mmap;

/// The owner of data behind a ByteView.
#[derive(Debug)]
enum Backing<'a> {
    Buf(Cow<'a, [u8]>),
    Mmap(Mmap),
}

impl Deref for Backing<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        match *self {
            Backing::Buf(ref buf) => buf,
            Backing::Mmap(ref mmap) => mmap,
        }
    }
}

/// A smart pointer for the bytes of a symbol file.
///
/// Symbol tables are decoded zero-copy, so the decoded table borrows from the buffer it was parsed
/// from. A `ByteView` is that buffer: it owns either a memory-mapped file or an in-memory vector
/// (or borrows a slice), and dereferences into `&[u8]`.
///
/// # Example
///
/// ```no_run
/// use unsym_common::ByteView;
///
/// fn main() -> Result<(), std::io::Error> {
///     let view = ByteView::open("UnrealServer.sym")?;
///     println!("{} bytes", view.len());
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct ByteView<'a> {
    backing: Arc<Backing<'a>>,
}

impl<'a> ByteView<'a> {
    fn with_backing(backing: Backing<'a>) -> Self {
        ByteView {
            backing: Arc::new(backing),
        }
    }

    /// Constructs a `ByteView` from a borrowed byte slice.
    ///
    /// ```
    /// use unsym_common::ByteView;
    ///
    /// let view = ByteView::from_slice(b"\0\0\0\0");
    /// assert_eq!(view.len(), 4);
    /// ```
    pub fn from_slice(buffer: &'a [u8]) -> Self {
        ByteView::with_backing(Backing::Buf(Cow::Borrowed(buffer)))
    }

    /// Constructs a `ByteView` from an owned vector of bytes.
    pub fn from_vec(buffer: Vec<u8>) -> Self {
        ByteView::with_backing(Backing::Buf(Cow::Owned(buffer)))
    }

    /// Constructs a `ByteView` by memory mapping an open file.
    ///
    /// Empty files yield an empty view.
    pub fn map_file(file: &File) -> Result<Self, io::Error> {
        // SAFETY: symbol files are build artifacts that are not modified while being read.
        let mmap = unsafe { Mmap::map(file) }?;
        Ok(ByteView::with_backing(Backing::Mmap(mmap)))
    }

    /// Constructs a `ByteView` by consuming a reader into an internal buffer.
    ///
    /// Use this for sources that cannot be mapped, such as pipes.
    pub fn read<R: io::Read>(mut reader: R) -> Result<Self, io::Error> {
        let mut buffer = vec![];
        reader.read_to_end(&mut buffer)?;
        Ok(ByteView::from_vec(buffer))
    }

    /// Constructs a `ByteView` by memory mapping the file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        Self::map_file(&file)
    }

    /// Returns a slice of the underlying data.
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        self.backing.deref()
    }
}

impl AsRef<[u8]> for ByteView<'_> {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Deref for ByteView<'_> {
    type Target = [u8];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}
