use crate::Entity;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{} does not have a node.", _0)]
    NonNodeFound(Entity),
    #[fail(display = "The world transform of {}'s parent can not be inversed.", _0)]
    CanNotInverseTransform(Entity),
    #[fail(display = "Node can not set self as parent.")]
    CanNotAttachSelfAsParent,
    #[fail(
        display = "{} can not be attached to {}, which lives in its own subtree.",
        child, parent
    )]
    CyclicHierarchy { child: Entity, parent: Entity },
}

pub type Result<T> = ::std::result::Result<T, Error>;
